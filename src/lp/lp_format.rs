//! CPLEX LP text format, readable by most MILP solvers and diagnostic tools.

use super::model::{ModelDefinition, ModelSense, Sense, VarType};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;

/// LP-format identifiers may only use letters, digits and `!"#$%&()/,.;?@_`'{}|~`
fn sanitize(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|ch| match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' => ch,
            '!' | '"' | '#' | '$' | '%' | '&' | '(' | ')' | '/' | ',' | '.' | ';' | '?' | '@'
            | '_' | '`' | '\'' | '{' | '}' | '|' | '~' => ch,
            _ => '_',
        })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        out.insert(0, '_');
    }
    out
}

fn fmt_num(x: f64) -> String {
    if x == f64::INFINITY {
        "+inf".to_string()
    } else if x == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if x == 0.0 {
        "0".to_string()
    } else {
        format!("{}", x)
    }
}

fn write_terms(line: &mut String, model: &ModelDefinition, terms: &[(super::Var, f64)]) {
    for (i, (var, coeff)) in terms.iter().enumerate() {
        let sign = if *coeff < 0.0 { "-" } else { "+" };
        let name = sanitize(&model.var(*var).name);
        if i == 0 && sign == "+" {
            let _ = write!(line, " {} {}", fmt_num(coeff.abs()), name);
        } else {
            let _ = write!(line, " {} {} {}", sign, fmt_num(coeff.abs()), name);
        }
    }
}

impl ModelDefinition {
    /// Write the model in LP format.
    pub fn write_lp<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\\ Model {}", self.name())?;
        match self.sense() {
            ModelSense::Maximize => writeln!(out, "Maximize")?,
            ModelSense::Minimize => writeln!(out, "Minimize")?,
        }

        let mut line = String::from(" obj:");
        let objective = self.objective().compacted();
        write_terms(&mut line, self, &objective);
        let constant = self.objective().constant_term();
        if constant != 0.0 || objective.is_empty() {
            let sign = if constant < 0.0 { "-" } else { "+" };
            let _ = write!(line, " {} {}", sign, fmt_num(constant.abs()));
        }
        writeln!(out, "{}", line)?;

        writeln!(out, "Subject To")?;
        for constr in self.constrs() {
            if constr.terms.is_empty() {
                writeln!(
                    out,
                    "\\ {}: 0 {} {} (no variable terms)",
                    sanitize(&constr.name),
                    constr.sense,
                    fmt_num(constr.rhs)
                )?;
                continue;
            }
            let mut line = format!(" {}:", sanitize(&constr.name));
            write_terms(&mut line, self, &constr.terms);
            let op = match constr.sense {
                Sense::Eq => "=",
                Sense::Le => "<=",
                Sense::Ge => ">=",
            };
            let _ = write!(line, " {} {}", op, fmt_num(constr.rhs));
            writeln!(out, "{}", line)?;
        }

        writeln!(out, "Bounds")?;
        for var in self.vars().iter().filter(|v| v.vtype == VarType::Continuous) {
            let name = sanitize(&var.name);
            if var.lb == var.ub {
                writeln!(out, " {} = {}", name, fmt_num(var.lb))?;
            } else if var.ub == f64::INFINITY {
                if var.lb != 0.0 {
                    writeln!(out, " {} >= {}", name, fmt_num(var.lb))?;
                }
            } else {
                writeln!(out, " {} <= {} <= {}", fmt_num(var.lb), name, fmt_num(var.ub))?;
            }
        }

        let binaries: Vec<_> = self
            .vars()
            .iter()
            .filter(|v| v.vtype == VarType::Binary)
            .collect();
        if !binaries.is_empty() {
            writeln!(out, "Binaries")?;
            for var in binaries {
                writeln!(out, " {}", sanitize(&var.name))?;
            }
        }
        writeln!(out, "End")
    }

    /// Write the model in LP format to `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        self.write_lp(&mut writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::{le, Model, ModelSense, VarType};

    #[test]
    fn sanitize_replaces_forbidden_characters() {
        assert_eq!(sanitize("qmo(r1,m1,SC1,tp1)"), "qmo(r1,m1,SC1,tp1)");
        assert_eq!(sanitize("a b[c]"), "a_b_c_");
        assert_eq!(sanitize("1x"), "_1x");
    }

    #[test]
    fn writes_all_sections() {
        let mut model = Model::new("demo");
        let f = model.add_family("x", &["I"]);
        let a = model.add_var(f, &["a"], VarType::Continuous, 0.0, 4.0).unwrap();
        let g = model.add_family("y", &["I"]);
        let b = model.add_var(g, &["a"], VarType::Binary, 0.0, 1.0).unwrap();
        model.add_constr("link(a)", le(a, 4.0 * b));
        model.set_objective(3.0 * a - 1.0 * b, ModelSense::Maximize);
        let model = model.finish();

        let mut buffer = Vec::new();
        model.write_lp(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Maximize\n obj: 3 x(a) - 1 y(a)\n"));
        assert!(text.contains("Subject To\n link(a): 1 x(a) - 4 y(a) <= 0\n"));
        assert!(text.contains(" 0 <= x(a) <= 4\n"));
        assert!(text.contains("Binaries\n y(a)\n"));
        assert!(text.ends_with("End\n"));
    }
}
