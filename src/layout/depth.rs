//! Dominance relation and drawing depth
//!
//! An edge that dominates others is drawn one layer farther from the tokens than the deepest
//! edge it dominates. Edges that dominate nothing sit at depth 0.

use super::error::LayoutError;

/// `over -> [under]` adjacency over edge positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dominance {
    dominates: Vec<Vec<usize>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Open,
    Done,
}

impl Dominance {
    pub fn new(edge_count: usize) -> Self {
        Self {
            dominates: vec![Vec::new(); edge_count],
        }
    }

    pub fn add(&mut self, over: usize, under: usize) {
        self.dominates[over].push(under);
    }

    pub fn len(&self) -> usize {
        self.dominates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dominates.is_empty()
    }

    /// Edges drawn below `over`
    pub fn dominated_by(&self, over: usize) -> &[usize] {
        &self.dominates[over]
    }

    /// Depth per edge, computed by an iterative post-order walk.
    ///
    /// `describe` names an edge for the error message if a cycle turns up.
    pub fn depths(&self, describe: impl Fn(usize) -> String) -> Result<Vec<usize>, LayoutError> {
        let n = self.dominates.len();
        let mut depth = vec![0usize; n];
        let mut visit = vec![Visit::New; n];

        for root in 0..n {
            if visit[root] != Visit::New {
                continue;
            }
            // (edge, next child to look at)
            let mut stack = vec![(root, 0usize)];
            visit[root] = Visit::Open;

            while let Some(top) = stack.last_mut() {
                let edge = top.0;
                if let Some(&child) = self.dominates[edge].get(top.1) {
                    top.1 += 1;
                    match visit[child] {
                        Visit::Done => {}
                        Visit::New => {
                            visit[child] = Visit::Open;
                            stack.push((child, 0));
                        }
                        Visit::Open => {
                            let from = stack.iter().position(|(e, _)| *e == child).unwrap_or(0);
                            let mut cycle: Vec<String> =
                                stack[from..].iter().map(|(e, _)| describe(*e)).collect();
                            cycle.push(describe(child));
                            return Err(LayoutError::cycle(cycle));
                        }
                    }
                } else {
                    depth[edge] = self.dominates[edge]
                        .iter()
                        .map(|d| depth[*d] + 1)
                        .max()
                        .unwrap_or(0);
                    visit[edge] = Visit::Done;
                    stack.pop();
                }
            }
        }

        Ok(depth)
    }
}
