use crate::ast::{
    ast::{ExprKind, Stmt},
    statements::{
        AssignmentStmt, ClassDeclStmt, Declarator, FnDeclStmt, ForStmt, IfStmt, Parameter,
        RangeForStmt, SwitchStmt, UpdateOperator, VarDeclStmt,
    },
};

use super::{
    compiler::Compiler,
    expr::{gen_expression, gen_symbol},
};

pub fn gen_statement(compiler: &mut Compiler, statement: &Stmt) {
    match statement {
        Stmt::Expression(stmt) => {
            let expression = gen_expression(compiler, &stmt.expression);
            compiler.line(&format!("{};", expression));
        }
        Stmt::VarDecl(decl) => gen_var_decl(compiler, decl),
        Stmt::Assignment(assignment) => gen_assignment(compiler, assignment),
        Stmt::FnDecl(decl) => {
            let header = gen_fn_header(compiler, decl);
            compiler.line(&format!("{} {{", header));
            gen_body(compiler, &decl.body);
            compiler.line("}");
        }
        Stmt::ClassDecl(decl) => gen_class_decl(compiler, decl),
        Stmt::If(stmt) => gen_if(compiler, stmt),
        Stmt::While(stmt) => {
            let condition = gen_expression(compiler, &stmt.condition);
            compiler.line(&format!("while ({}) {{", condition));
            gen_body(compiler, &stmt.body);
            compiler.line("}");
        }
        Stmt::For(stmt) => gen_for(compiler, stmt),
        Stmt::RangeFor(stmt) => gen_range_for(compiler, stmt),
        Stmt::Switch(stmt) => gen_switch(compiler, stmt),
        Stmt::Break => compiler.line("break;"),
        Stmt::Continue => compiler.line("continue;"),
        Stmt::Return(stmt) => match &stmt.value {
            Some(value) => {
                let value = gen_expression(compiler, value);
                compiler.line(&format!("return {};", value));
            }
            None => compiler.line("return;"),
        },
        Stmt::Print(stmt) => {
            let value = gen_expression(compiler, &stmt.value);
            compiler.line(&format!("console.log({});", value));
        }
        Stmt::Block(block) => {
            compiler.line("{");
            gen_body(compiler, &block.body);
            compiler.line("}");
        }
    }
}

/// Renders `body` one level deeper than the current line.
fn gen_body(compiler: &mut Compiler, body: &[Stmt]) {
    compiler.indented(|compiler| {
        for stmt in body.iter() {
            gen_statement(compiler, stmt);
        }
    });
}

fn declarator_names(compiler: &mut Compiler, declarators: &[Declarator]) -> Vec<String> {
    declarators
        .iter()
        .map(|declarator| compiler.mangle(declarator.id, &declarator.name))
        .collect()
}

/// Joins targets and values into one binding. Several targets are written
/// through array destructuring so every value is evaluated first.
fn destructure(targets: &[String], values: &[String]) -> String {
    if targets.len() == 1 && values.len() == 1 {
        format!("{} = {}", targets[0], values[0])
    } else {
        format!("[{}] = [{}]", targets.join(", "), values.join(", "))
    }
}

fn gen_var_decl(compiler: &mut Compiler, decl: &VarDeclStmt) {
    let keyword = if decl.is_constant { "const" } else { "let" };
    let names = declarator_names(compiler, &decl.declarators);

    if decl.values.is_empty() {
        compiler.line(&format!("{} {};", keyword, names.join(", ")));
        return;
    }

    let values = decl
        .values
        .iter()
        .map(|value| gen_expression(compiler, value))
        .collect::<Vec<_>>();
    compiler.line(&format!("{} {};", keyword, destructure(&names, &values)));
}

fn gen_assignment(compiler: &mut Compiler, assignment: &AssignmentStmt) {
    let targets = assignment
        .targets
        .iter()
        .map(|target| gen_expression(compiler, target))
        .collect::<Vec<_>>();
    let values = assignment
        .values
        .iter()
        .map(|value| gen_expression(compiler, value))
        .collect::<Vec<_>>();

    compiler.line(&format!("{};", destructure(&targets, &values)));
}

fn gen_parameters(compiler: &mut Compiler, parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|parameter| {
            let name = compiler.mangle(parameter.id, &parameter.name);
            match &parameter.default {
                Some(default) => format!("{} = {}", name, gen_expression(compiler, default)),
                None => name,
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `async function name_1(a_2, b_3 = 1)`
fn gen_fn_header(compiler: &mut Compiler, decl: &FnDeclStmt) -> String {
    let name = compiler.mangle(decl.id, &decl.name);
    let parameters = gen_parameters(compiler, &decl.parameters);
    let keyword = if decl.is_async { "async function" } else { "function" };

    format!("{} {}({})", keyword, name, parameters)
}

/// Class members are bindings of the enclosing scope, so the body renders
/// there first. The constructor copies member variables onto `this` and
/// member functions are attached to the prototype.
fn gen_class_decl(compiler: &mut Compiler, decl: &ClassDeclStmt) {
    let name = compiler.mangle(decl.id, &decl.name);
    let parameters = gen_parameters(compiler, &decl.parameters);

    let mut fields = vec![];
    let mut methods = vec![];
    for stmt in decl.body.iter() {
        match stmt {
            Stmt::VarDecl(member) => fields.extend(declarator_names(compiler, &member.declarators)),
            Stmt::FnDecl(method) => methods.push(compiler.mangle(method.id, &method.name)),
            _ => {}
        }
        gen_statement(compiler, stmt);
    }

    compiler.line(&format!("function {}({}) {{", name, parameters));
    compiler.indented(|compiler| {
        for field in fields.iter() {
            compiler.line(&format!("this.{field} = {field};"));
        }
    });
    compiler.line("}");

    for method in methods.iter() {
        compiler.line(&format!("{name}.prototype.{method} = {method};"));
    }
}

fn gen_if(compiler: &mut Compiler, stmt: &IfStmt) {
    for (i, branch) in stmt.branches.iter().enumerate() {
        let condition = gen_expression(compiler, &branch.condition);
        if i == 0 {
            compiler.line(&format!("if ({}) {{", condition));
        } else {
            compiler.line(&format!("}} else if ({}) {{", condition));
        }
        gen_body(compiler, &branch.body);
    }

    if let Some(alternate) = &stmt.alternate {
        compiler.line("} else {");
        gen_body(compiler, alternate);
    }

    compiler.line("}");
}

fn gen_for(compiler: &mut Compiler, stmt: &ForStmt) {
    let index = compiler.mangle(stmt.index.id, &stmt.index.name);
    let init = gen_expression(compiler, &stmt.init);
    let test = gen_expression(compiler, &stmt.test);

    let target = gen_symbol(compiler, &stmt.update.target);
    let update = match &stmt.update.operator {
        UpdateOperator::Increment => format!("{}++", target),
        UpdateOperator::Decrement => format!("{}--", target),
        UpdateOperator::Increase(step) => format!("{} += {}", target, gen_expression(compiler, step)),
        UpdateOperator::Decrease(step) => format!("{} -= {}", target, gen_expression(compiler, step)),
    };

    compiler.line(&format!("for (let {} = {}; {}; {}) {{", index, init, test, update));
    gen_body(compiler, &stmt.body);
    compiler.line("}");
}

fn gen_range_for(compiler: &mut Compiler, stmt: &RangeForStmt) {
    let start = gen_expression(compiler, &stmt.start);
    let end = gen_expression(compiler, &stmt.end);
    let index = compiler.fresh_name("range");

    compiler.line(&format!(
        "for (let {index} = {start}; ({index} < {end}); {index}++) {{"
    ));
    gen_body(compiler, &stmt.body);
    compiler.line("}");
}

/// Cases are boolean guards, so the branch switches on `true` and the first
/// guard that holds is taken. The scrutinee is still evaluated once, before
/// any guard.
fn gen_switch(compiler: &mut Compiler, stmt: &SwitchStmt) {
    let scrutinee = gen_expression(compiler, &stmt.scrutinee);
    if !matches!(stmt.scrutinee.kind, ExprKind::Literal(_) | ExprKind::Symbol(_)) {
        compiler.line(&format!("{};", scrutinee));
    }
    compiler.line("switch (true) {");

    compiler.indented(|compiler| {
        for case in stmt.cases.iter() {
            let guard = gen_expression(compiler, &case.guard);
            compiler.line(&format!("case {}:", guard));
            compiler.indented(|compiler| {
                for stmt in case.body.iter() {
                    gen_statement(compiler, stmt);
                }
                compiler.line("break;");
            });
        }

        if let Some(default) = &stmt.default {
            compiler.line("default:");
            gen_body(compiler, default);
        }
    });

    compiler.line("}");
}

