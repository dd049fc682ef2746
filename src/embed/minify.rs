//! Minification of embedded JS and CSS.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Both return `None` when
//! the input does not parse, and callers keep the original text.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

pub fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::cjs()).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

pub fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_css() {
        let css = "main {\n  padding-top: 80px;\n}\n";
        let min = minify_css(css).unwrap();
        assert!(min.len() < css.len());
        assert!(min.contains("padding-top:80px"));
    }

    #[test]
    fn test_minify_js() {
        let js = "(function () {\n  var headerOffset = 80;\n  window.folioOffset = headerOffset;\n})();\n";
        let min = minify_js(js).unwrap();
        assert!(min.len() < js.len());
        assert!(min.contains("folioOffset"));
    }

    #[test]
    fn test_invalid_input() {
        assert!(minify_js("function (").is_none());
    }
}
