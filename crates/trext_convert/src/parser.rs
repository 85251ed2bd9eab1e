use anyhow::{Result, anyhow};
use log::trace;
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::path::Path;

/// Picks a parse mode from the file extension. Everything parses as a
/// module except the explicit CommonJS extensions, mirroring how compilers
/// treat extensionful JS/TS on disk.
pub(crate) fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    SourceType::default()
        .with_jsx(matches!(ext, Some("tsx") | Some("jsx")))
        .with_typescript(matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts")))
        .with_module(!matches!(ext, Some("cjs") | Some("cts")))
}

/// Parses a file's source text. A parse that panics or reports errors is
/// fatal for the file.
pub(crate) fn parse<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    source_type: SourceType,
    filename: &Path,
) -> Result<Program<'a>> {
    trace!("Parsing {}", filename.display());
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(allocator, source, source_type).parse();

    if panicked || !errors.is_empty() {
        return Err(anyhow!("Could not compile file {}", filename.display()));
    }

    Ok(program)
}
