//! Interactive terminal prompts for the form title and the questions.

use std::io::{self, BufRead, Write};

use formquiz_application::{ApplicationError, ApplicationResult};
use formquiz_domain::QuestionRecord;

/// Keyword that ends option entry and question entry.
const DONE: &str = "done";

/// Minimum number of options before `done` is accepted.
const MIN_OPTIONS: usize = 2;

fn is_done(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(DONE)
}

/// Line-oriented prompter over any reader and writer.
///
/// Invalid answers are re-prompted. End of input ends question entry;
/// a question left half-entered at that point is discarded.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter reading answers from `input`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `prompt` and reads one line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Asks for the form title until a non-blank one is given.
    ///
    /// # Errors
    ///
    /// `ApplicationError::Input` if input ends first.
    pub fn title(&mut self) -> ApplicationResult<String> {
        loop {
            let Some(title) = self.ask("Enter the form title: ")? else {
                return Err(ApplicationError::Input("no form title given".to_string()));
            };
            let title = title.trim();
            if !title.is_empty() {
                return Ok(title.to_string());
            }
            self.say("  Error: The title cannot be empty.")?;
        }
    }

    /// Asks for the document title; an empty answer keeps `title`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn document_title(&mut self, title: &str) -> ApplicationResult<String> {
        let answer = self.ask(&format!("Enter the document title (Enter for '{title}'): "))?;
        Ok(match answer.as_deref().map(str::trim) {
            Some(doc) if !doc.is_empty() => doc.to_string(),
            _ => title.to_string(),
        })
    }

    /// Collects questions until `done` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn questions(&mut self) -> ApplicationResult<Vec<QuestionRecord>> {
        let mut questions = Vec::new();
        self.say("\n--- Add Questions ---")?;

        loop {
            let prompt = format!(
                "\nQuestion {} text (or '{DONE}' to finish): ",
                questions.len() + 1
            );
            let Some(text) = self.ask(&prompt)? else {
                break;
            };
            if is_done(&text) {
                break;
            }
            if text.trim().is_empty() {
                self.say("  Error: The question text cannot be empty.")?;
                continue;
            }

            match self.question_body(text.trim())? {
                Some(record) => {
                    questions.push(record);
                    self.say("--- Question Added ---")?;
                }
                None => break,
            }
        }

        Ok(questions)
    }

    /// Reads options, correct index and points for one question.
    fn question_body(&mut self, text: &str) -> io::Result<Option<QuestionRecord>> {
        let Some(options) = self.options()? else {
            return Ok(None);
        };
        let Some(correct_index) = self.correct_index(options.len())? else {
            return Ok(None);
        };
        let Some(points) = self.points()? else {
            return Ok(None);
        };
        Ok(Some(QuestionRecord::new(text, options, correct_index, points)))
    }

    fn options(&mut self) -> io::Result<Option<Vec<String>>> {
        let mut options: Vec<String> = Vec::new();
        self.say("Enter options for this question:")?;

        loop {
            let prompt = format!(
                "  Option {} text (or '{DONE}' once you have at least {MIN_OPTIONS}): ",
                options.len() + 1
            );
            let Some(option) = self.ask(&prompt)? else {
                return Ok(None);
            };

            if is_done(&option) {
                if options.len() >= MIN_OPTIONS {
                    return Ok(Some(options));
                }
                self.say(&format!(
                    "  Error: Please add at least {MIN_OPTIONS} options before typing '{DONE}'."
                ))?;
                continue;
            }

            let option = option.trim();
            if option.is_empty() {
                self.say("  Error: An option cannot be empty.")?;
            } else if options.iter().any(|existing| existing == option) {
                self.say(&format!("  Error: '{option}' is already an option."))?;
            } else {
                options.push(option.to_string());
            }
        }
    }

    fn correct_index(&mut self, len: usize) -> io::Result<Option<i64>> {
        let last = len.saturating_sub(1);
        loop {
            let prompt = format!("  Enter the 0-based index of the correct answer (0 to {last}): ");
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(None);
            };
            match answer.trim().parse::<i64>() {
                Ok(index) if usize::try_from(index).is_ok_and(|i| i < len) => {
                    return Ok(Some(index));
                }
                Ok(_) => self.say(&format!(
                    "  Error: Invalid index. Please enter a number between 0 and {last}."
                ))?,
                Err(_) => self.say("  Error: Please enter a number for the index.")?,
            }
        }
    }

    fn points(&mut self) -> io::Result<Option<i64>> {
        loop {
            let Some(answer) = self.ask("  Enter the point value (a positive integer): ")? else {
                return Ok(None);
            };
            match answer.trim().parse::<i64>() {
                Ok(points) if points > 0 => return Ok(Some(points)),
                Ok(_) => self.say("  Error: The point value must be a positive integer.")?,
                Err(_) => self.say("  Error: Please enter a number for the point value.")?,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output.clone()).unwrap()
    }

    #[test]
    fn test_title_reprompts_on_blank() {
        let mut p = prompter("\n  \nGeography Quiz\n");
        assert_eq!(p.title().unwrap(), "Geography Quiz");
        assert_eq!(transcript(&p).matches("cannot be empty").count(), 2);
    }

    #[test]
    fn test_title_at_end_of_input() {
        let mut p = prompter("");
        assert!(matches!(p.title(), Err(ApplicationError::Input(_))));
    }

    #[test]
    fn test_document_title_defaults_to_title() {
        let mut p = prompter("\n");
        assert_eq!(p.document_title("Quiz").unwrap(), "Quiz");

        let mut p = prompter("Quiz Doc\n");
        assert_eq!(p.document_title("Quiz").unwrap(), "Quiz Doc");

        let mut p = prompter("");
        assert_eq!(p.document_title("Quiz").unwrap(), "Quiz");
    }

    #[test]
    fn test_full_question_entry() {
        let script = "\
What is 2 + 2?
3
4
DONE
1
5
Red Planet?
Earth
Mars
done
1
15
Done
";
        let mut p = prompter(script);
        let questions = p.questions().unwrap();

        assert_eq!(
            questions,
            vec![
                QuestionRecord::new("What is 2 + 2?", ["3", "4"], 1, 5),
                QuestionRecord::new("Red Planet?", ["Earth", "Mars"], 1, 15),
            ]
        );
    }

    #[test]
    fn test_done_needs_two_options() {
        let script = "Q\nonly\ndone\nsecond\ndone\n0\n1\ndone\n";
        let mut p = prompter(script);
        let questions = p.questions().unwrap();

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options, vec!["only", "second"]);
        assert!(transcript(&p).contains("Please add at least 2 options"));
    }

    #[test]
    fn test_invalid_index_and_points_reprompt() {
        let script = "Q\na\nb\ndone\nx\n2\n-1\n1\nten\n0\n-3\n7\ndone\n";
        let mut p = prompter(script);
        let questions = p.questions().unwrap();

        assert_eq!(questions, vec![QuestionRecord::new("Q", ["a", "b"], 1, 7)]);
        let out = transcript(&p);
        assert_eq!(out.matches("Please enter a number for the index").count(), 1);
        assert_eq!(out.matches("Invalid index").count(), 2);
        assert_eq!(out.matches("Please enter a number for the point value").count(), 1);
        assert_eq!(out.matches("must be a positive integer").count(), 2);
    }

    #[test]
    fn test_blank_and_duplicate_options_rejected() {
        let script = "Q\na\n\na\nb\ndone\n0\n1\ndone\n";
        let mut p = prompter(script);
        let questions = p.questions().unwrap();

        assert_eq!(questions[0].options, vec!["a", "b"]);
        let out = transcript(&p);
        assert!(out.contains("An option cannot be empty"));
        assert!(out.contains("'a' is already an option"));
    }

    #[test]
    fn test_end_of_input_discards_partial_question() {
        let script = "Q1\na\nb\ndone\n0\n1\nQ2\nx\n";
        let mut p = prompter(script);
        let questions = p.questions().unwrap();

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Q1");
    }

    #[test]
    fn test_immediate_done_gives_no_questions() {
        let mut p = prompter("done\n");
        assert!(p.questions().unwrap().is_empty());
    }
}
