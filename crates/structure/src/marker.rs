use crate::QAPair;

const QUESTION_MARKERS: &[&str] = &["q:", "question:"];
const ANSWER_MARKERS: &[&str] = &["a:", "answer:"];

fn strip_marker<'a>(line: &'a str, markers: &[&str]) -> Option<&'a str> {
    let lower = line.to_lowercase();
    for marker in markers {
        if lower.starts_with(marker) {
            return Some(line[marker.len()..].trim_start());
        }
    }
    None
}

/// Deterministic parser for input that already carries structure: `Q:`/`A:`
/// marker lines or `question? answer` one-liners.
///
/// Returns `None` as soon as any non-empty line cannot be attributed to a
/// pair; the caller then sends the whole input down the LLM path instead.
pub fn parse_marked(text: &str) -> Option<Vec<QAPair>> {
    let mut pairs = Vec::new();
    let mut question: Option<String> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = strip_marker(line, QUESTION_MARKERS) {
            if question.is_some() {
                // two questions in a row, no answer between them
                return None;
            }
            question = Some(rest.to_string());
        } else if let Some(rest) = strip_marker(line, ANSWER_MARKERS) {
            let q = question.take()?;
            if q.is_empty() || rest.is_empty() {
                return None;
            }
            pairs.push(QAPair {
                question: q,
                answer: rest.to_string(),
            });
        } else if let Some(q) = &mut question {
            // continuation line of a multi-line question
            q.push(' ');
            q.push_str(line);
        } else if let Some(pair) = split_one_liner(line) {
            pairs.push(pair);
        } else {
            return None;
        }
    }

    if question.is_some() {
        // trailing question with no answer
        return None;
    }
    Some(pairs)
}

/// "What is the capital of France? Paris" → one pair.
fn split_one_liner(line: &str) -> Option<QAPair> {
    let idx = line.rfind('?')?;
    let question = line[..=idx].trim();
    let answer = line[idx + 1..].trim();
    if question.len() <= 1 || answer.is_empty() {
        return None;
    }
    Some(QAPair {
        question: question.to_string(),
        answer: answer.to_string(),
    })
}
