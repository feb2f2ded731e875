use crate::ast::*;

pub fn to_sexp(program: &Program) -> String {
    let mut buf = String::new();
    for stmt in &program.body {
        sexp_stmt(&mut buf, stmt);
        buf.push('\n');
    }
    buf
}

pub fn to_json(program: &Program) -> serde_json::Result<String> {
    serde_json::to_string_pretty(program)
}

fn sexp_stmt(buf: &mut String, stmt: &Stmt) {
    match stmt {
        Stmt::Chains(chains) => {
            buf.push_str("(chains");
            for chain in &chains.body {
                buf.push(' ');
                sexp_chain(buf, chain);
            }
            buf.push(')');
        }
        Stmt::Sets(sets) => {
            buf.push_str("(sets");
            for set in &sets.body {
                buf.push(' ');
                sexp_set(buf, set);
            }
            buf.push(')');
        }
        Stmt::Operation(op) => {
            buf.push_str("(operation ");
            buf.push_str(&op.identifier.lexeme);
            buf.push(' ');
            sexp_expr(buf, &op.rhs);
            buf.push(')');
        }
    }
}

fn sexp_chain(buf: &mut String, chain: &ChainSingle) {
    buf.push_str("(chain");
    for word in &chain.body {
        buf.push_str(" (word ");
        buf.push_str(&word.label.lexeme);
        buf.push(' ');
        buf.push_str(&word.identifier.lexeme);
        buf.push(' ');
        sexp_expr(buf, &word.rhs);
        buf.push(')');
    }
    buf.push(')');
}

fn sexp_set(buf: &mut String, set: &SetSingle) {
    buf.push_str("(set ");
    buf.push_str(&set.action.lexeme);
    for float in &set.body {
        buf.push(' ');
        buf.push_str(&format!("{}", float.value));
    }
    buf.push(' ');
    buf.push_str(&set.ordinal.lexeme);
    buf.push(')');
}

fn sexp_expr(buf: &mut String, expr: &Expr) {
    match expr {
        Expr::Binary(b) => {
            buf.push('(');
            buf.push_str(&b.operator.to_string());
            buf.push(' ');
            sexp_expr(buf, &b.lhs);
            buf.push(' ');
            sexp_expr(buf, &b.rhs);
            buf.push(')');
        }
        Expr::Unary(u) => {
            buf.push('(');
            buf.push_str(&u.operator.to_string());
            buf.push(' ');
            sexp_expr(buf, &u.operand);
            buf.push(')');
        }
        Expr::Identifier(i) => buf.push_str(&i.symbol.lexeme),
        Expr::Integer(i) => buf.push_str(&i.value.to_string()),
        Expr::Float(f) => buf.push_str(&format!("{}", f.value)),
        Expr::Function(f) => {
            buf.push('(');
            buf.push_str(&f.function.to_string());
            buf.push(' ');
            sexp_expr(buf, &f.argument);
            buf.push(')');
        }
    }
}
