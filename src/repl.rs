use session::{BitRegister, Calculator, Config};

use crate::command::{Command, HELP, RegisterCommand};
use crate::report::Report;

/// Everything a terminal session mutates.
pub struct Repl {
    calculator: Calculator,
    register: BitRegister,
}

impl Repl {
    pub fn new(config: &Config) -> Self {
        Self {
            calculator: Calculator::new(config),
            register: BitRegister::new(config.register_width),
        }
    }

    /// Runs one input line. `None` means the session is over.
    pub fn handle(&mut self, line: &str) -> Option<Report> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!("rejected `{}`: {e}", line.trim());
                return Some(Report::error(e));
            }
        };

        let report = match command {
            Command::SetOperand(slot, text) => {
                match self.calculator.set_operand_text(slot, &text) {
                    Ok(value) => Report::operand(slot, value),
                    Err(e) => {
                        tracing::warn!("invalid operand {slot}: {e}");
                        Report::error(e)
                    }
                }
            }
            Command::SetShift(text) => match self.calculator.set_shift_text(&text) {
                Ok(amount) => Report::Shift { amount },
                Err(e) => {
                    tracing::warn!("invalid shift amount: {e}");
                    Report::error(e)
                }
            },
            Command::SetCarry(carry) => {
                self.calculator.set_carry(carry);
                Report::Carry { carry }
            }
            Command::SetBase(base) => {
                self.calculator.set_input_base(base);
                Report::base(&self.calculator)
            }
            Command::Run(operation) => {
                let entry = self.calculator.apply(operation);
                Report::Executed {
                    entry,
                    flags: self.calculator.flags(),
                }
            }
            Command::Flags => Report::flags(&self.calculator),
            Command::Conditions => Report::Conditions {
                passing: self.calculator.passing_conditions(),
            },
            Command::State => Report::State(self.calculator.snapshot()),
            Command::History => Report::history(&self.calculator),
            Command::ClearHistory => {
                self.calculator.clear_history();
                Report::Cleared
            }
            Command::Register(command) => self.register_command(command),
            Command::Help => Report::Help { text: HELP },
            Command::Quit => return None,
        };

        Some(report)
    }

    fn register_command(&mut self, command: RegisterCommand) -> Report {
        match command {
            RegisterCommand::Show => {}
            RegisterCommand::Set(value) => self.register.update(value, "set"),
            RegisterCommand::Toggle(bit) => {
                if let Err(e) = self.register.toggle_bit(bit) {
                    tracing::warn!("{e}");
                    return Report::error(e);
                }
            }
            RegisterCommand::Width(width) => self.register.set_width(width),
            RegisterCommand::Clear => self.register.clear(),
        }

        Report::register(&self.register)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alu::Operand;
    use pretty_assertions::assert_eq;

    fn run(repl: &mut Repl, lines: &[&str]) -> Vec<String> {
        lines
            .iter()
            .filter_map(|line| repl.handle(line))
            .map(|report| report.to_string())
            .collect()
    }

    #[test]
    fn add_with_carry_chain() {
        let mut repl = Repl::new(&Config::default());
        run(&mut repl, &["a -1", "b 1", "add", "adc"]);

        assert_eq!(repl.calculator.a(), Operand::new(2));
        assert_eq!(repl.calculator.history().len(), 2);
    }

    #[test]
    fn bad_input_is_reported_and_ignored() {
        let mut repl = Repl::new(&Config::default());
        let out = run(&mut repl, &["a 12x", "frobnicate", "shift"]);

        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|line| line.starts_with("error: ")));
        assert_eq!(repl.calculator.a(), Operand::new(5));
    }

    #[test]
    fn binary_base_operands() {
        let mut repl = Repl::new(&Config::default());
        let out = run(&mut repl, &["base bin", "a 1111", "b 0001", "sub"]);

        assert_eq!(out[0], "input base = bin (A = 101, B = 111)");
        assert_eq!(repl.calculator.a(), Operand::new(14));
    }

    #[test]
    fn register_follows_width() {
        let config = Config {
            register_width: session::BitWidth::W8,
            ..Config::default()
        };
        let mut repl = Repl::new(&config);
        let out = run(
            &mut repl,
            &["reg set 0x1FF", "reg toggle 0", "reg toggle 8", "reg width 16"],
        );

        assert_eq!(out[0], "reg = 255 (signed -1, 0xFF) 8-bit\n  11111111");
        assert_eq!(out[1], "reg = 254 (signed -2, 0xFE) 8-bit\n  11111110");
        assert_eq!(out[2], "error: bit 8 is outside a 8-bit value");
        assert_eq!(repl.register.value(), 0xFE);
    }

    #[test]
    fn quit_ends_the_session() {
        let mut repl = Repl::new(&Config::default());
        assert!(repl.handle("quit").is_none());
        assert!(repl.handle("help").is_some());
    }
}
