//! Names bound to the same value by a chained declaration such as
//! `let Foo = Foo_1 = class Foo {}`.

use rustc_hash::FxHashMap;
use swc_core::{atoms::Atom, ecma::ast::*};

use crate::ast::{
    Node, NodeKind, assign_target_ident,
    search::{Filter, search},
    unparen,
};

/// For every name of a chain, the other names of that chain.
pub type AliasTable = FxHashMap<Atom, Vec<Atom>>;

/// Scans the variable declarations reachable from `root` for initializers
/// that are plain `=` assignment chains.
///
/// Compound operators (`+=`, `||=`, ...) end the chain. A chain with a single
/// participant contributes nothing.
pub fn resolve_aliases(root: Node<'_>) -> AliasTable {
    let mut table = AliasTable::default();

    for node in search(root, NodeKind::VariableDeclaration, &Filter::new()) {
        let Node::VarDecl(var_decl) = node else {
            continue;
        };
        for declarator in &var_decl.decls {
            let Some(Expr::Assign(init)) = declarator.init.as_deref().map(unparen) else {
                continue;
            };
            if init.op != op!("=") {
                continue;
            }

            let mut chain = Vec::new();
            if let Pat::Ident(binding) = &declarator.name {
                chain.push(binding.id.sym.clone());
            }
            collect_chain(init, &mut chain);

            for name in &chain {
                let others = chain
                    .iter()
                    .filter(|other| *other != name)
                    .cloned()
                    .collect::<Vec<_>>();
                if !others.is_empty() {
                    table.insert(name.clone(), others);
                }
            }
        }
    }

    table
}

fn collect_chain(assign: &AssignExpr, chain: &mut Vec<Atom>) {
    if let Some(name) = assign_target_ident(assign) {
        chain.push(name.into());
    }
    if let Expr::Assign(next) = unparen(&assign.right)
        && next.op == op!("=")
    {
        collect_chain(next, chain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{SourceSyntax, parse};

    fn aliases_of(table: &AliasTable, name: &str) -> Vec<String> {
        table
            .get(&Atom::from(name))
            .map(|names| names.iter().map(|n| n.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn chained_declaration_links_every_name() {
        let file = parse(
            "const X = Y = Z = __decorateClass([d], W);",
            "test.js",
            SourceSyntax::Ecmascript,
        )
        .unwrap();
        let table = resolve_aliases(file.root());

        assert_eq!(aliases_of(&table, "X"), vec!["Y", "Z"]);
        assert_eq!(aliases_of(&table, "Y"), vec!["X", "Z"]);
        assert_eq!(aliases_of(&table, "Z"), vec!["X", "Y"]);
        assert!(!table.contains_key(&Atom::from("W")));
    }

    #[test]
    fn membership_is_symmetric() {
        let file = parse(
            "var Foo_1;\nlet Foo = Foo_1 = class Foo {};\nexport const a = b = 1;",
            "test.js",
            SourceSyntax::Ecmascript,
        )
        .unwrap();
        let table = resolve_aliases(file.root());

        for (name, others) in &table {
            for other in others {
                assert!(table[other].contains(name), "{other} should alias {name}");
            }
        }
        assert_eq!(aliases_of(&table, "Foo"), vec!["Foo_1"]);
        assert_eq!(aliases_of(&table, "a"), vec!["b"]);
    }

    #[test]
    fn ignores_non_chains() {
        let file = parse(
            "const a = f();\nlet b = c += 1;\nlet d;",
            "test.js",
            SourceSyntax::Ecmascript,
        )
        .unwrap();
        assert!(resolve_aliases(file.root()).is_empty());
    }

    #[test]
    fn compound_operator_ends_the_chain() {
        let file = parse("let a = b = c += 1;", "test.js", SourceSyntax::Ecmascript).unwrap();
        let table = resolve_aliases(file.root());
        assert_eq!(aliases_of(&table, "a"), vec!["b"]);
        assert!(!table.contains_key(&Atom::from("c")));
    }
}
