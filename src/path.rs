use serde::Serialize;

// Single drawing command from an SVG `d` attribute. Parameters are kept exactly as
// written (no absolute/relative resolution, no arity checks).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathCommand {
    pub command: char,
    pub params: Vec<f64>,
}

impl PathCommand {
    pub fn new(command: char, params: Vec<f64>) -> Self {
        Self { command, params }
    }

    pub fn is_close(&self) -> bool {
        matches!(self.command, 'Z' | 'z')
    }
}

pub fn is_command_letter(b: u8) -> bool {
    matches!(
        b,
        b'M' | b'm'
            | b'L'
            | b'l'
            | b'H'
            | b'h'
            | b'V'
            | b'v'
            | b'C'
            | b'c'
            | b'S'
            | b's'
            | b'Q'
            | b'q'
            | b'T'
            | b't'
            | b'A'
            | b'a'
            | b'Z'
            | b'z'
    )
}

pub fn tokenize(d: &str) -> Vec<PathCommand> {
    let mut tokenizer = PathTokenizer::new(d);
    tokenizer.run();
    tokenizer.out
}

// Scanner state:
// - `current` is the open command collecting parameters (None before the first letter)
// - `start`/`has_digit`/`has_dot` describe the numeric token being accumulated
struct PathTokenizer<'a> {
    bytes: &'a [u8],
    i: usize,
    current: Option<PathCommand>,
    start: Option<usize>,
    has_digit: bool,
    has_dot: bool,
    out: Vec<PathCommand>,
}

impl<'a> PathTokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            i: 0,
            current: None,
            start: None,
            has_digit: false,
            has_dot: false,
            out: Vec::new(),
        }
    }

    fn run(&mut self) {
        while self.i < self.bytes.len() {
            let b = self.bytes[self.i];
            if is_command_letter(b) {
                self.flush_number();
                if let Some(done) = self.current.take() {
                    self.out.push(done);
                }
                self.current = Some(PathCommand::new(b as char, Vec::new()));
            } else if b.is_ascii_digit() {
                if self.start.is_none() {
                    self.begin_number();
                }
                self.has_digit = true;
            } else if b == b'.' {
                // A second point ends the token: "1.5.5" is 1.5 then .5
                if self.has_dot || self.start.is_none() {
                    self.flush_number();
                    self.begin_number();
                }
                self.has_dot = true;
            } else if b == b'+' || b == b'-' {
                self.flush_number();
                self.begin_number();
            } else {
                self.flush_number();
            }
            self.i += 1;
        }
        self.flush_number();
        if let Some(done) = self.current.take() {
            self.out.push(done);
        }
    }

    fn begin_number(&mut self) {
        self.start = Some(self.i);
        self.has_digit = false;
        self.has_dot = false;
    }

    fn flush_number(&mut self) {
        let Some(start) = self.start.take() else {
            return;
        };
        let has_digit = std::mem::replace(&mut self.has_digit, false);
        self.has_dot = false;
        // Lone signs/points and numbers ahead of the first command are dropped.
        if !has_digit {
            return;
        }
        let Some(cmd) = self.current.as_mut() else {
            return;
        };
        // Token bytes are ASCII sign/digits/point, so both conversions succeed.
        if let Some(value) = std::str::from_utf8(&self.bytes[start..self.i])
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
        {
            cmd.params.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_commands_on_letters() {
        let cmds = tokenize("M10 20L30 40Z");
        assert_eq!(
            cmds,
            vec![
                PathCommand::new('M', vec![10.0, 20.0]),
                PathCommand::new('L', vec![30.0, 40.0]),
                PathCommand::new('Z', vec![]),
            ]
        );
    }

    #[test]
    fn keeps_repeated_commands_in_order() {
        let cmds = tokenize("M0 0 L1 1 L2 2 l3 3 z");
        let letters: String = cmds.iter().map(|c| c.command).collect();
        assert_eq!(letters, "MLLlz");
        assert!(cmds[4].is_close());
        assert!(cmds[4].params.is_empty());
    }

    #[test]
    fn signs_start_new_numbers() {
        let cmds = tokenize("m-5-10.5+3");
        assert_eq!(cmds, vec![PathCommand::new('m', vec![-5.0, -10.5, 3.0])]);
    }

    #[test]
    fn second_decimal_point_splits_number() {
        let cmds = tokenize("l1.5.5.25");
        assert_eq!(cmds, vec![PathCommand::new('l', vec![1.5, 0.5, 0.25])]);
    }

    #[test]
    fn commas_and_whitespace_separate_params() {
        let cmds = tokenize("C 1,2\t3,4\n5,6");
        assert_eq!(
            cmds,
            vec![PathCommand::new('C', vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])]
        );
    }

    #[test]
    fn arity_is_not_checked() {
        let cmds = tokenize("A5 5 0 0 1 H V");
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0].params, vec![5.0, 5.0, 0.0, 0.0, 1.0]);
        assert!(cmds[1].params.is_empty());
        assert!(cmds[2].params.is_empty());
    }

    #[test]
    fn text_before_first_command_is_ignored() {
        let cmds = tokenize("  12 34 M1 2");
        assert_eq!(cmds, vec![PathCommand::new('M', vec![1.0, 2.0])]);
    }

    #[test]
    fn lone_sign_or_point_yields_nothing() {
        let cmds = tokenize("M - . 4");
        assert_eq!(cmds, vec![PathCommand::new('M', vec![4.0])]);
    }

    #[test]
    fn empty_input_has_no_commands() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
