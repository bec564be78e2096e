use strparse_core::parse_factory;

pub struct Label;

#[parse_factory(strict)]
impl Label {
    pub fn parse(_input: &str) -> Self {
        Label
    }
}

fn main() {
    let _ = Label::parse("x");
}
