use strparse_core::{ParserRegistry, parse_factory};

pub struct Port(u16);

#[parse_factory]
impl Port {
    pub fn parse(input: &str) -> Result<Self, std::num::ParseIntError> {
        input.parse().map(Port)
    }
}

fn main() {
    let registry = ParserRegistry::new();
    assert_eq!(registry.parse::<Port>("8080").unwrap().0, 8080);
    assert!(registry.parse::<Port>("http").is_err());
}
