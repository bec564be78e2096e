use strparse_core::parse_factory;

pub struct Wrapper<T>(T);

#[parse_factory]
impl<T: Default> Wrapper<T> {
    pub fn parse(_input: &str) -> Self {
        Wrapper(T::default())
    }
}

fn main() {
    let _ = Wrapper::<u8>::parse("x").0;
}
