//! Complexity and size walks over method and initializer bodies.
//!
//! Cyclomatic complexity starts at 1 and counts branching constructs: `if`,
//! the loop forms, each switch case, and `try`. Nesting depth is tracked
//! alongside (entering a branching construct descends one level), yielding
//! the maximum nesting as a side metric. Statement counting covers executable
//! statement nodes only; blocks, empty statements, and local type
//! declarations are not executable.

use crate::frontend::{Block, Statement};

/// Result of one body walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BodyMetrics {
    pub cyclomatic: u32,
    pub max_nesting: u32,
    pub statements: u32,
}

/// Walk a body iteratively, carrying the nesting level per statement.
pub(crate) fn analyze_block(block: &Block) -> BodyMetrics {
    let mut metrics = BodyMetrics {
        cyclomatic: 1,
        max_nesting: 0,
        statements: 0,
    };

    let mut stack: Vec<(&Statement, u32)> = block
        .statements
        .iter()
        .map(|statement| (statement, 0))
        .collect();

    while let Some((statement, depth)) = stack.pop() {
        if is_executable(statement) {
            metrics.statements += 1;
        }

        let branching = match statement {
            Statement::If { .. }
            | Statement::While { .. }
            | Statement::DoWhile { .. }
            | Statement::For { .. }
            | Statement::ForEach { .. }
            | Statement::Try { .. } => {
                metrics.cyclomatic += 1;
                true
            }
            Statement::Switch { cases, .. } => {
                metrics.cyclomatic += cases.len() as u32;
                true
            }
            _ => false,
        };

        let child_depth = if branching {
            let level = depth + 1;
            metrics.max_nesting = metrics.max_nesting.max(level);
            level
        } else {
            depth
        };

        for child in statement.child_statements() {
            stack.push((child, child_depth));
        }
    }

    metrics
}

fn is_executable(statement: &Statement) -> bool {
    !matches!(
        statement,
        Statement::Block(_) | Statement::Empty | Statement::LocalType(_)
    )
}
