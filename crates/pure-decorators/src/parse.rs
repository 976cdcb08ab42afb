use std::ops::Range;

use anyhow::{Result, bail};
use serde::Deserialize;
use swc_core::{
    common::{
        BytePos, FileName, GLOBALS, Globals, SourceMap, Span, Spanned, input::StringInput,
        sync::Lrc,
    },
    ecma::{
        ast::{EsVersion, Program},
        parser::{EsSyntax, Parser, Syntax, TsSyntax, error::Error, lexer::Lexer},
    },
};

use crate::ast::Node;

/// Grammar the input file is parsed with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSyntax {
    /// Plain ECMAScript, which is what a TypeScript file looks like once the
    /// build has stripped its types.
    #[default]
    Ecmascript,
    Typescript,
}

impl From<SourceSyntax> for Syntax {
    fn from(syntax: SourceSyntax) -> Self {
        match syntax {
            SourceSyntax::Ecmascript => Syntax::Es(EsSyntax {
                decorators: true,
                ..Default::default()
            }),
            SourceSyntax::Typescript => Syntax::Typescript(TsSyntax {
                decorators: true,
                ..Default::default()
            }),
        }
    }
}

/// A parsed module together with what is needed to map its spans back to
/// byte offsets into the text it was parsed from.
pub struct ParsedFile {
    program: Program,
    start_pos: BytePos,
}

impl ParsedFile {
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn root(&self) -> Node<'_> {
        Node::Program(&self.program)
    }

    /// Byte range of `span` in the source text.
    pub fn range(&self, span: Span) -> Range<usize> {
        let offset = |pos: BytePos| (pos.0 - self.start_pos.0) as usize;
        offset(span.lo)..offset(span.hi)
    }
}

/// Parses `code` as an ECMAScript module.
///
/// Recoverable syntax errors are reported like fatal ones: the transform never
/// works on a partially understood file.
pub fn parse(code: &str, id: &str, syntax: SourceSyntax) -> Result<ParsedFile> {
    GLOBALS.set(&Globals::new(), || {
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(FileName::Custom(id.to_string()).into(), code.to_string());

        let lexer = Lexer::new(
            syntax.into(),
            EsVersion::latest(),
            StringInput::from(&*fm),
            None,
        );
        let mut parser = Parser::new_from(lexer);
        let span = tracing::trace_span!("swc_parse", id).entered();
        let result = parser.parse_module();
        drop(span);

        let describe = |error: &Error| {
            let range = (error.span().lo.0.saturating_sub(fm.start_pos.0))
                ..(error.span().hi.0.saturating_sub(fm.start_pos.0));
            format!("{} at {range:?}", error.kind().msg())
        };

        let mut messages = parser
            .take_errors()
            .iter()
            .map(describe)
            .collect::<Vec<_>>();
        let module = match result {
            Ok(module) => Some(module),
            Err(error) => {
                messages.push(describe(&error));
                None
            }
        };

        match module {
            Some(module) if messages.is_empty() => Ok(ParsedFile {
                program: Program::Module(module),
                start_pos: fm.start_pos,
            }),
            _ => bail!("failed to parse {id}: {}", messages.join("; ")),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_relative_to_the_source() {
        let code = "a();\nFoo = __decorate([dec], Foo);";
        let file = parse(code, "test.js", SourceSyntax::Ecmascript).unwrap();
        let Program::Module(module) = file.program() else {
            panic!("expected a module");
        };

        let ranges = module
            .body
            .iter()
            .map(|item| &code[file.range(Node::from_module_item(item).span())])
            .collect::<Vec<_>>();
        assert_eq!(ranges, vec!["a();", "Foo = __decorate([dec], Foo);"]);
    }

    #[test]
    fn reports_syntax_errors() {
        let error = parse("let = ;", "broken.js", SourceSyntax::Ecmascript)
            .err()
            .unwrap();
        assert!(error.to_string().starts_with("failed to parse broken.js"));
    }

    #[test]
    fn typescript_syntax_accepts_type_annotations() {
        assert!(parse("let a: number = 1;", "a.ts", SourceSyntax::Ecmascript).is_err());
        assert!(parse("let a: number = 1;", "a.ts", SourceSyntax::Typescript).is_ok());
    }
}
