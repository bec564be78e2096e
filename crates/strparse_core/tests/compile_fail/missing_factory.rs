use strparse_core::parse_factory;

pub struct Label;

#[parse_factory]
impl Label {
    pub fn new() -> Self {
        Label
    }
}

fn main() {
    let _ = Label::new();
}
