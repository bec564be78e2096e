use strparse_core::{ParserRegistry, parse_factory};

pub struct Word(String);

#[parse_factory]
impl Word {
    pub fn parse<'a>(input: &'a str) -> Self {
        Word(input.split_whitespace().next().unwrap_or_default().to_owned())
    }
}

fn main() {
    let registry = ParserRegistry::new();
    assert_eq!(registry.parse::<Word>("first second").unwrap().0, "first");
}
