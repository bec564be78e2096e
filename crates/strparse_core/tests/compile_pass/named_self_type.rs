use strparse_core::{ParserRegistry, parse_factory};

pub struct Celsius(f64);

#[parse_factory]
impl Celsius {
    /// Other associated items are left untouched.
    pub const ZERO: Celsius = Celsius(0.0);

    pub fn parse(input: &str) -> Celsius {
        Celsius(input.trim_end_matches("C").parse().unwrap_or(Self::ZERO.0))
    }
}

fn main() {
    let registry = ParserRegistry::new();
    assert_eq!(registry.parse::<Celsius>("21.5C").unwrap().0, 21.5);
}
