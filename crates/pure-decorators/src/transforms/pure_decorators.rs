//! Moves the statements that call decorator helpers (`__decorate`,
//! `__decorateClass`, ...) into one immediately invoked arrow function per
//! decorated binding, and tags that call with an internal pure marker.
//!
//! before:
//!
//! ```js
//! let Foo = class Foo {};
//! __decorate([Input()], Foo.prototype, "value", void 0);
//! Foo = __decorate([Component()], Foo);
//! ```
//!
//! after:
//!
//! ```js
//! let Foo = class Foo {};
//!
//!
//! Foo = /**!PURE*/ ((_) => {
//!     __decorate([Input()], _.prototype, "value", void 0);
//! _ = __decorate([Component()], _);;
//!     return _;
//! })(Foo);
//! ```
//!
//! Once [`crate::finalize`] has turned the marker into `/* @__PURE__ */`, a
//! minifier is free to drop the whole block when `Foo` is never used.

use std::{borrow::Cow, cmp::Reverse, iter, sync::LazyLock};

use anyhow::{Context, Result, bail};
use indexmap::{IndexMap, map::Entry};
use regex::{Captures, Regex};
use rustc_hash::FxHashSet;
use serde_json::Value;
use swc_core::{
    atoms::Atom,
    ecma::ast::{Expr, ExprOrSpread},
};
use tracing::{debug, trace};

use crate::{
    aliases::resolve_aliases,
    ast::{
        Node, NodeKind,
        search::{Filter, search},
        unparen,
        walk::ancestors_of,
    },
    edit::{EditSet, TextEdit},
    parse::ParsedFile,
};

/// Prefix of every generated block, rewritten by [`crate::finalize`].
pub const PURE_MARKER: &str = "/**!PURE*/";

/// Helpers emitted by `tsc` and esbuild for legacy decorators.
pub const DEFAULT_HELPERS: [&str; 2] = ["__decorate", "__decorateClass"];

static IDENTIFIER_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w$]+").unwrap());

/// Identifier tokens that may be references, with everything that can hold
/// identifier-like text without referencing a binding matched as a whole:
/// string and template literals, comments, spreads and member property names.
static REFERENCE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\.)*`"#,
        r"|//[^\n]*|/\*[\s\S]*?\*/|\.\.\.",
        r"|\??\.\s*[\w$]+",
        r"|(?P<ident>[\w$]+)",
    ))
    .unwrap()
});

/// Marks where the block of `module_name` goes until it is assembled.
pub fn placeholder(module_name: &str) -> String {
    format!("__##{module_name}##__")
}

#[derive(Debug)]
struct ModuleRecord {
    aliases: Vec<Atom>,
    placeholder: String,
}

/// Rewrites `code`, the text `file` was parsed from.
///
/// Fails when a relocated statement cannot be attributed to any decorated
/// binding; the caller is expected to keep `code` untouched in that case.
pub fn relocate_decorators(code: &str, file: &ParsedFile, helpers: &[Atom]) -> Result<String> {
    let root = file.root();
    let declared_aliases = resolve_aliases(root);

    let mut calls = Vec::new();
    for helper in helpers {
        let filter = Filter::new().attr(
            |node: &Node<'_>| node.callee_name().map(Value::from),
            &**helper,
        );
        calls.extend(search(root, NodeKind::CallExpression, &filter));
    }
    // Offsets of later statements must stay valid while earlier ones are cut.
    calls.sort_by_key(|call| Reverse(call.span().lo.0));
    calls.dedup_by(|a, b| a.is(b));

    let mut edits = EditSet::default();
    let mut modules: IndexMap<Atom, ModuleRecord> = IndexMap::default();
    let mut extracted: Vec<&str> = Vec::new();
    let mut relocated = FxHashSet::default();

    for call_node in calls {
        let Node::Call(call) = call_node else {
            continue;
        };
        let ancestors = ancestors_of(call_node, root);

        let mut candidates: Vec<Atom> = Vec::new();
        candidates.extend(member_object_name(call.args.get(1)));

        let statement = ancestors.get(1).copied().unwrap_or(call_node);
        let range = file.range(statement.span());
        if !relocated.insert(range.start) {
            trace!(?range, "statement already relocated");
            continue;
        }
        let declaration = code
            .get(range.clone())
            .with_context(|| format!("statement range {range:?} is outside the source"))?;
        extracted.push(declaration);

        for name in ancestors.iter().skip(1).filter_map(Node::assign_target_name) {
            if !candidates.iter().any(|candidate| &**candidate == name) {
                candidates.push(name.into());
            }
        }

        let Some(module_name) = candidates.first().cloned() else {
            debug!(?range, "relocating statement without a binding of its own");
            edits.push(TextEdit::delete(range))?;
            continue;
        };
        match modules.entry(module_name) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                for alias in candidates {
                    if !record.aliases.contains(&alias) {
                        record.aliases.push(alias);
                    }
                }
                edits.push(TextEdit::delete(range))?;
            }
            Entry::Vacant(entry) => {
                debug!(module = &**entry.key(), "found decorated binding");
                let placeholder = placeholder(entry.key());
                edits.push(TextEdit::replace(range, placeholder.clone()))?;
                entry.insert(ModuleRecord {
                    aliases: candidates,
                    placeholder,
                });
            }
        }
    }

    if extracted.is_empty() {
        return Ok(code.to_string());
    }

    let mut grouped: IndexMap<&Atom, Vec<&str>> = IndexMap::default();
    for declaration in extracted {
        let Some(module_name) = modules
            .iter()
            .find(|(_, record)| {
                record
                    .aliases
                    .iter()
                    .any(|alias| declaration.contains(&**alias))
            })
            .map(|(name, _)| name)
        else {
            bail!("module not found in declaration {declaration:?}");
        };
        grouped.entry(module_name).or_default().push(declaration);
    }

    let mut output = edits.apply(code)?;

    for (module_name, declarations) in grouped {
        let record = &modules[module_name];
        let block = declarations.into_iter().rev().collect::<Vec<_>>().join("\n");
        let param = neutral_param(&block);
        let block = rename_aliases(&block, &record.aliases, &param);

        let names = iter::once(module_name)
            .chain(declared_aliases.get(module_name).into_iter().flatten())
            .map(|name| &**name)
            .collect::<Vec<_>>()
            .join(" = ");
        let wrapper = format!(
            "\n{names} = {PURE_MARKER} (({param}) => {{\n    {block};\n    return \
             {param};\n}})({module_name});\n"
        );
        output = output.replacen(&record.placeholder, &wrapper, 1);
    }

    for record in modules.values() {
        output = output.replace(&record.placeholder, "");
    }

    Ok(output)
}

/// `Foo` for a call like `__decorate([...], Foo.prototype, "x", null)`.
fn member_object_name(arg: Option<&ExprOrSpread>) -> Option<Atom> {
    let arg = arg.filter(|arg| arg.spread.is_none())?;
    let Expr::Member(member) = unparen(&arg.expr) else {
        return None;
    };
    match unparen(&member.obj) {
        Expr::Ident(ident) => Some(ident.sym.clone()),
        _ => None,
    }
}

/// A parameter name that does not collide with any identifier of `block`.
fn neutral_param(block: &str) -> String {
    let tokens = IDENTIFIER_TOKEN
        .find_iter(block)
        .map(|m| m.as_str())
        .collect::<FxHashSet<_>>();

    let mut param = String::from("_");
    let mut suffix = 0;
    while tokens.contains(param.as_str()) {
        suffix += 1;
        param = format!("_{suffix}");
    }
    param
}

/// Replaces every reference to one of `aliases` with `param`.
///
/// Literal text and property names keep their spelling. Interpolations of a
/// template literal are left alone too: they still see the outer binding.
fn rename_aliases<'b>(block: &'b str, aliases: &[Atom], param: &str) -> Cow<'b, str> {
    REFERENCE_TOKEN.replace_all(block, |caps: &Captures<'_>| match caps.name("ident") {
        Some(ident) if aliases.iter().any(|alias| &**alias == ident.as_str()) => {
            param.to_string()
        }
        _ => caps[0].to_string(),
    })
}
