//! opcheck_printer: Tree to text output.
//!
//! Converts expressions and statements back into source notation. Used for
//! diagnostic text, where the printed form of a synthesized expression is
//! trimmed down to the operator the user wrote.

use opcheck_ast::node::*;
use opcheck_core::intern::{InternedString, StringInterner};

/// Options for the printer.
pub struct PrinterOptions {
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline after a unit.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// The printer converts nodes to text.
pub struct Printer<'i> {
    output: String,
    options: PrinterOptions,
    interner: &'i StringInterner,
}

impl<'i> Printer<'i> {
    /// A printer with default options.
    pub fn new(interner: &'i StringInterner) -> Self {
        Self::with_options(interner, PrinterOptions::default())
    }

    /// A printer with the given options.
    pub fn with_options(interner: &'i StringInterner, options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(256),
            options,
            interner,
        }
    }

    fn resolve(&self, s: InternedString) -> &'i str {
        self.interner.resolve(s)
    }

    /// Print a single expression to a string.
    pub fn print_expr(&mut self, expr: &Expression<'_>) -> String {
        self.output.clear();
        self.print_expression(expr);
        std::mem::take(&mut self.output)
    }

    /// Print a whole unit, one statement per line.
    pub fn print_unit(&mut self, unit: &SourceUnit<'_>) -> String {
        self.output.clear();
        for (i, stmt) in unit.statements.iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.print_statement(stmt);
        }
        if self.options.trailing_newline && !self.output.is_empty() {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::Expression(n) => {
                self.print_expression(n.expression);
                self.write(";");
            }
            Statement::Assign(n) => {
                self.print_variable(&n.target);
                self.write(" = ");
                self.print_expression(n.expression);
                self.write(";");
            }
        }
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_expression(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::Variable(n) => self.print_variable(n),
            Expression::IntLiteral(n) => self.write_owned(n.value.to_string()),
            Expression::FloatLiteral(n) => self.write_owned(format_float(n.value)),
            Expression::StringLiteral(n) => {
                let text = self.resolve(n.value);
                self.write_owned(quote_string(text));
            }
            Expression::TrueKeyword(_) => self.write("true"),
            Expression::FalseKeyword(_) => self.write("false"),
            Expression::NullKeyword(_) => self.write("null"),
            Expression::ArrayLiteral(n) => {
                self.write("[");
                for (i, item) in n.items.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_expression(item);
                }
                self.write("]");
            }
            Expression::Parenthesized(n) => {
                self.write("(");
                self.print_expression(n.expression);
                self.write(")");
            }
            Expression::Binary(n) => {
                self.print_expression(n.left);
                self.write(" ");
                self.write(n.operator.as_str());
                self.write(" ");
                self.print_expression(n.right);
            }
        }
    }

    fn print_variable(&mut self, var: &Variable) {
        self.write("$");
        let name = self.resolve(var.name);
        self.write(name);
    }

    // ========================================================================
    // Core write helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_owned(&mut self, s: String) {
        self.output.push_str(&s);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }
}

/// Floats always keep a fractional part so they never read back as ints.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Single-quote a string, escaping backslashes and quotes.
pub fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        if ch == '\'' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}
