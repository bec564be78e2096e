use strparse_core::parse_factory;

pub struct Token;

#[parse_factory]
impl Token {
    pub unsafe fn parse(_input: &str) -> Self {
        Token
    }
}

fn main() {
    // SAFETY: `parse` has no preconditions.
    let _ = unsafe { Token::parse("x") };
}
