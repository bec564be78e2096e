use strparse_core::parse_factory;

pub struct Label;

#[parse_factory]
impl Label {
    pub fn parse<T: Default>(_input: &str) -> Self {
        let _ = T::default();
        Label
    }
}

fn main() {
    let _ = Label::parse::<u8>("x");
}
