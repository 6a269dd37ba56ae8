/*!
 * Line-preserving text chunking.
 *
 * Lines are packed greedily into chunks of at most `max_chars` chars
 * (counting the joining newlines). A single line longer than the cap is
 * hard-split at the cap. Joining the chunks with `\n` gives back the input
 * whenever no hard split happened.
 */

/// Default soft cap, sized for the narrowest networked provider
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 450;

/// Split `text` into ordered chunks; never returns an empty vector
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for line in text.split('\n') {
        let line_len = line.chars().count();

        if line_len > max_chars {
            if let Some((chunk, _)) = current.take() {
                chunks.push(chunk);
            }
            chunks.extend(hard_split(line, max_chars));
            continue;
        }

        current = match current.take() {
            None => Some((line.to_string(), line_len)),
            Some((mut chunk, len)) if len + 1 + line_len <= max_chars => {
                chunk.push('\n');
                chunk.push_str(line);
                Some((chunk, len + 1 + line_len))
            }
            Some((chunk, _)) => {
                chunks.push(chunk);
                Some((line.to_string(), line_len))
            }
        };
    }

    if let Some((chunk, _)) = current {
        chunks.push(chunk);
    }

    if chunks.is_empty() {
        chunks.push(String::new());
    }
    chunks
}

/// Split a chunk into its leading whitespace, its content, and its trailing whitespace
///
/// Providers are free to trim their answers; the edges are put back around
/// the answer so blank lines at a chunk boundary survive the join.
pub fn split_edges(chunk: &str) -> (&str, &str, &str) {
    let body = chunk.trim();
    if body.is_empty() {
        return (chunk, "", "");
    }
    let leading = &chunk[..chunk.len() - chunk.trim_start().len()];
    let trailing = &chunk[chunk.trim_end().len()..];
    (leading, body, trailing)
}

/// Cut one over-long line into pieces of exactly `max_chars` chars (last may be shorter)
fn hard_split(line: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(max_chars)
        .map(|piece| piece.iter().collect())
        .collect()
}
