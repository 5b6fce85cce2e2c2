extern crate dot;

use std::io;
use std::io::Write;

use crate::parser::{BinaryOperator, Expr};

type GraphNode = usize;
type GraphEdge = (usize, &'static str, usize);

/// GraphViz view of a parse tree, one graph node per tree node.
pub struct ParseTreeGraph<'e> {
    nodes: Vec<&'e Expr>,
    edges: Vec<GraphEdge>,
}

impl<'e> ParseTreeGraph<'e> {
    pub fn new(root: &'e Expr) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        graph.visit(root);
        graph
    }

    pub fn render_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::render(self, writer)
    }

    // preorder: the root is node 0
    fn visit(&mut self, node: &'e Expr) -> GraphNode {
        let id = self.nodes.len();
        self.nodes.push(node);

        match node {
            Expr::Not(e) => {
                let child = self.visit(e);
                self.edges.push((id, "", child));
            }
            Expr::BinaryOp(_, l, r) => {
                let left = self.visit(l);
                self.edges.push((id, "L", left));
                let right = self.visit(r);
                self.edges.push((id, "R", right));
            }
            Expr::Constant(_) | Expr::Var(_) => {}
        }

        id
    }
}

impl<'a> dot::Labeller<'a, GraphNode, GraphEdge> for ParseTreeGraph<'_> {
    fn graph_id(&self) -> dot::Id<'a> {
        dot::Id::new("parse_tree").expect("cannot create Id named 'parse_tree'")
    }

    fn node_id(&self, n: &GraphNode) -> dot::Id<'a> {
        dot::Id::new(format!("n_{}", n))
            .unwrap_or_else(|_| panic!("cannot create Id named 'n_{n}'"))
    }

    fn node_label(&self, n: &GraphNode) -> dot::LabelText<'a> {
        match self.nodes[*n] {
            Expr::BinaryOp(BinaryOperator::And, _, _) => dot::LabelText::label("And"),
            Expr::BinaryOp(BinaryOperator::Or, _, _) => dot::LabelText::label("Or"),
            Expr::BinaryOp(BinaryOperator::Xor, _, _) => dot::LabelText::label("Xor"),
            Expr::Not(_) => dot::LabelText::label("Not"),
            Expr::Constant(true) => dot::LabelText::label("True"),
            Expr::Constant(false) => dot::LabelText::label("False"),
            Expr::Var(v) => dot::LabelText::label(format!("Var {}", v)),
        }
    }

    fn edge_label(&self, e: &GraphEdge) -> dot::LabelText<'a> {
        dot::LabelText::label(e.1)
    }
}

impl<'a> dot::GraphWalk<'a, GraphNode, GraphEdge> for ParseTreeGraph<'_> {
    fn nodes(&self) -> dot::Nodes<'a, GraphNode> {
        (0..self.nodes.len()).collect()
    }

    fn edges(&self) -> dot::Edges<'a, GraphEdge> {
        self.edges.clone().into()
    }

    fn source(&self, e: &GraphEdge) -> GraphNode {
        e.0
    }

    fn target(&self, e: &GraphEdge) -> GraphNode {
        e.2
    }
}
