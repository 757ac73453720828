use std::{
    error::Error,
    fmt::{Display, Formatter},
};

use hier_err::{
    compose, render_hierarchical, render_linear, tree_unwrap, wrap_err, AsErrNode, Cause, ErrNode,
    HierErr,
};

fn main() {
    println!("Single error:\n{}\n", single_leaf());
    println!("Nested error:\n{}\n", nested_leaf());
    println!("Doubly nested error:\n{}\n", double_nested_leaf());
    println!("Siblings:\n{}\n", siblings());
    println!("Siblings, linear:\n{}\n", render_linear(&sibling_tree()));

    quad_nested_leaf();
}

#[derive(Debug)]
struct Err1 {}
impl Error for Err1 {}
impl Display for Err1 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "error 1")
    }
}

#[derive(Debug)]
enum Err2 {
    Underlying(Err1),
    This(Box<Err2>),
    Origin,
}
impl Error for Err2 {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Underlying(x) => Some(x),
            Self::This(x) => Some(x),
            Self::Origin => None,
        }
    }
}
impl Display for Err2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Underlying(_) => write!(f, "error 1 caused error 2"),
            Self::This(_) => write!(f, "error 2 caused by itself"),
            Self::Origin => write!(f, "error 2"),
        }
    }
}

/// Keeps every underlying error, unlike [`Error::source`].
#[derive(Debug)]
struct Err3(Vec<Err2>);

impl Error for Err3 {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        // Arbitrarily return only the first error
        self.0.first().map(|x| x as &(dyn Error + 'static))
    }
}
impl Display for Err3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "multiple error 2")
    }
}
impl AsErrNode for Err3 {
    fn as_err_node(&self, func: &mut dyn FnMut(ErrNode<'_>)) {
        let errs: Vec<&(dyn Error + 'static)> =
            self.0.iter().map(|x| x as &(dyn Error + 'static)).collect();
        let causes: Vec<&dyn AsErrNode> = errs.iter().map(|x| x as &dyn AsErrNode).collect();
        (func)(ErrNode::new(self, &causes))
    }
}

fn single_leaf() -> String {
    render_hierarchical(&Err1 {} as &(dyn Error + 'static))
}

fn nested_leaf() -> String {
    render_hierarchical(&Err2::Underlying(Err1 {}) as &(dyn Error + 'static))
}

fn double_nested_leaf() -> String {
    let err = Err2::This(Box::new(Err2::Underlying(Err1 {})));
    render_hierarchical(&err as &(dyn Error + 'static))
}

fn sibling_tree() -> HierErr {
    let multiple = Err3(vec![
        Err2::This(Box::new(Err2::Underlying(Err1 {}))),
        Err2::Origin,
    ]);

    compose("error 4", [Cause::foreign(multiple), Cause::from("plain text")])
}

fn siblings() -> String {
    render_hierarchical(&sibling_tree())
}

fn quad_nested_leaf() {
    let err = wrap_err!(sibling_tree(), "failed after {} attempts", 3);
    tree_unwrap(Err::<(), _>(err));
}
