use getcomments::{extract_with, CommentsMap, ExtractOptions, Extractor, Input};

use crate::output::{print_maps, OutputFormat};

/// Extract through `extractor`, parsing the inputs in parallel.
pub fn run(args: &[String], extractor: &Extractor, format: OutputFormat) -> Result<(), String> {
    let inputs = detect_all(args);
    let maps = extractor
        .extract_all(&inputs)
        .into_iter()
        .collect::<Result<Vec<CommentsMap>, _>>()
        .map_err(|e| e.to_string())?;
    print_maps(&maps, format)
}

/// Extract each input in turn with no parse cache.
pub fn run_uncached(args: &[String], options: &ExtractOptions, format: OutputFormat) -> Result<(), String> {
    let maps = detect_all(args)
        .iter()
        .map(|input| extract_with(input, options))
        .collect::<Result<Vec<CommentsMap>, _>>()
        .map_err(|e| e.to_string())?;
    print_maps(&maps, format)
}

fn detect_all(args: &[String]) -> Vec<Input> {
    args.iter()
        .map(|arg| {
            let input = Input::detect(arg);
            if let Input::File(path) = &input {
                tracing::info!(path = %path.display(), "reading file");
            }
            input
        })
        .collect()
}
