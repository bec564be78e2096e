use strparse_core::{ParserRegistry, parse_factory};

pub struct Label(String);

#[parse_factory]
impl Label {
    pub fn parse(input: &str) -> Self {
        Label(input.to_owned())
    }
}

fn main() {
    let registry = ParserRegistry::new();
    let label = registry.parse::<Label>("hello").unwrap();
    assert_eq!(label.0, "hello");
}
