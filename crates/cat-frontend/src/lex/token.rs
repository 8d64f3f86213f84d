use logos::Logos;

#[derive(Logos, Debug)]
pub enum FreeToken<'src> {
    #[token("declare")]
    Declare,

    #[token("define")]
    Define,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("->")]
    MinArrow,

    #[token("~>")]
    TildeArrow,

    #[token(":")]
    Colon,

    #[regex(r"'[a-z][a-zA-Z0-9_]*", |lex| &lex.slice()[1..])]
    TypeVar(&'src str),

    #[regex(r"'[A-Z][a-zA-Z0-9_]*", |lex| &lex.slice()[1..])]
    StackVar(&'src str),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_?!]*")]
    Name(&'src str),

    #[regex(r"[0-9][0-9_]*")]
    DecNumber(&'src str),

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*")]
    DecFloat(&'src str),

    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    String(&'src str),

    #[error]
    #[regex(r"[ \t\n\r\v\f]+", logos::skip)]
    #[regex(r"//[^\n\r]*", logos::skip)]
    Error,
}
