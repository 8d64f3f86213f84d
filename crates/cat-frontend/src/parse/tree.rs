use cat_common::message::Span;

pub type Name = String;

#[derive(Clone, Debug)]
pub struct Item {
    pub node: ItemNode,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum ItemNode {
    Declare {
        name: Name,
        name_span: Span,
        ty: Type,
    },

    Define {
        name: Name,
        name_span: Span,
        anno: Option<Type>,
        body: Vec<Term>,
    },
}

#[derive(Clone, Debug)]
pub struct Type {
    pub node: TypeNode,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum TypeNode {
    Name(Name),
    TypeVar(Name),
    StackVar(Name),

    Function {
        cons: Vec<Type>,
        prod: Vec<Type>,
        effects: bool,
    },

    Invalid,
}

#[derive(Clone, Debug)]
pub struct Term {
    pub node: TermNode,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum TermNode {
    Name(Name),
    Int(u64),
    Double(String),
    String(String),

    Quote(Vec<Term>),

    Invalid,
}
