use strparse_core::parse_factory;

pub struct Token;

#[parse_factory]
impl Token {
    pub async fn parse(_input: &str) -> Self {
        Token
    }
}

fn main() {
    let _ = Token::parse("x");
}
