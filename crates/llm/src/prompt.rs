pub fn build_structuring_prompt(raw_text: &str) -> String {
    format!(
        r#"Here is a block of text containing one or more trivia question-answer pairs. Parse it and identify each distinct question and its corresponding answer. Handle various delimiters (newlines, markers like Q:, A:, Answer:, etc.) intelligently.

INSTRUCTIONS:
1. Output ONLY a JSON list, nothing else
2. Each element is an object with a "question" key and an "answer" key
3. No markdown, no explanations

EXAMPLE OUTPUT:
[
  {{"question": "Question text 1?", "answer": "Answer 1"}},
  {{"question": "Question text 2?", "answer": "Answer 2"}}
]

INPUT TEXT:
{}

JSON OUTPUT:"#,
        raw_text
    )
}

pub fn build_key_entity_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"Consider the following trivia question and its answer:
Question: "{question}"
Answer: "{answer}"

Your task is to analyze question-answer pairs and identify the implicit "key entity" that connects them. The key entity is critical knowledge required to answer the question correctly, but is not explicitly stated in the question itself. Respond with ONLY the name of the most specific subject/topic. If the answer itself is the clear topic, just repeat the answer, but think carefully before answering.

Examples:

Question: The body of which US President, who died in 1885, lies in Riverside Park in Manhattan, in the largest mausoleum in North America?
Answer: Ulysses S Grant
Key Entity: Grant's Tomb

Question: What name precedes "en-Y" in the surgical procedure often used as part of a gastric bypass?
Answer: Roux
Key Entity: Roux-en-Y

Question: What King was victorious at a battle fought on Saint Crispin's Day in 1415?
Answer: Henry V
Key Entity: Battle of Agincourt

Question: A term from what game titles the 2024 Sally Rooney novel about Ivan and Paul Koubek?
Answer: Chess
Key Entity: Intermezzo (novel)

Question: Who invented the martial art whose name translates as 'the way of the intercepting fist'?
Answer: Bruce Lee
Key Entity: Jeet Kune Do

For the following question-answer pair, identify the implicit key entity:
Question: {question}
Answer: {answer}"#
    )
}
