use strparse_core::{ParseConvention, ParserRegistry};

#[derive(ParseConvention)]
pub struct Percent(u8);

impl std::str::FromStr for Percent {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_end_matches('%').parse().map(Percent)
    }
}

fn main() {
    let registry = ParserRegistry::new();
    assert_eq!(registry.parse::<Percent>("42%").unwrap().0, 42);
}
