use strparse_core::ParseConvention;

#[derive(ParseConvention)]
pub struct Wrapper<T>(T);

impl<T: Default> std::str::FromStr for Wrapper<T> {
    type Err = std::convert::Infallible;

    fn from_str(_: &str) -> Result<Self, Self::Err> {
        Ok(Wrapper(T::default()))
    }
}

fn main() {
    let _ = "x".parse::<Wrapper<u8>>().map(|w| w.0);
}
