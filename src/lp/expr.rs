use std::collections::HashMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Handle to a decision variable of a [`super::Model`]. Only meaningful for the model that
/// created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(pub(crate) usize);

impl Var {
    /// Position of the variable in the model's variable list
    pub fn index(self) -> usize {
        self.0
    }
}

/// An affine expression `Σ coeff * var + constant`.
///
/// Terms are kept in insertion order and may repeat the same variable; use
/// [`LinExpr::compacted`] to obtain merged coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinExpr {
    terms: Vec<(Var, f64)>,
    constant: f64,
}

impl LinExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: f64) -> Self {
        LinExpr {
            terms: Vec::new(),
            constant: value,
        }
    }

    pub fn add_term(&mut self, coeff: f64, var: Var) -> &mut Self {
        self.terms.push((var, coeff));
        self
    }

    pub fn terms(&self) -> &[(Var, f64)] {
        &self.terms
    }

    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    /// Merge repeated variables, keeping the order of first appearance. Terms whose
    /// coefficients sum to zero are dropped.
    pub fn compacted(&self) -> Vec<(Var, f64)> {
        let mut position: HashMap<Var, usize> = HashMap::with_capacity(self.terms.len());
        let mut out: Vec<(Var, f64)> = Vec::with_capacity(self.terms.len());
        for &(var, coeff) in &self.terms {
            match position.get(&var) {
                Some(&i) => out[i].1 += coeff,
                None => {
                    position.insert(var, out.len());
                    out.push((var, coeff));
                }
            }
        }
        out.retain(|(_, coeff)| *coeff != 0.0);
        out
    }

    /// Value of the expression for a full assignment of the model's variables
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coeff)| coeff * values[var.0])
            .sum::<f64>()
            + self.constant
    }

    fn scale(mut self, factor: f64) -> Self {
        for (_, coeff) in self.terms.iter_mut() {
            *coeff *= factor;
        }
        self.constant *= factor;
        self
    }
}

impl From<Var> for LinExpr {
    fn from(var: Var) -> Self {
        LinExpr {
            terms: vec![(var, 1.0)],
            constant: 0.0,
        }
    }
}

impl From<f64> for LinExpr {
    fn from(value: f64) -> Self {
        LinExpr::constant(value)
    }
}

impl Mul<Var> for f64 {
    type Output = LinExpr;

    fn mul(self, var: Var) -> LinExpr {
        LinExpr {
            terms: vec![(var, self)],
            constant: 0.0,
        }
    }
}

impl Mul<f64> for Var {
    type Output = LinExpr;

    fn mul(self, coeff: f64) -> LinExpr {
        coeff * self
    }
}

impl Mul<f64> for LinExpr {
    type Output = LinExpr;

    fn mul(self, factor: f64) -> LinExpr {
        self.scale(factor)
    }
}

impl Mul<LinExpr> for f64 {
    type Output = LinExpr;

    fn mul(self, expr: LinExpr) -> LinExpr {
        expr.scale(self)
    }
}

impl Neg for LinExpr {
    type Output = LinExpr;

    fn neg(self) -> LinExpr {
        self.scale(-1.0)
    }
}

impl<T: Into<LinExpr>> AddAssign<T> for LinExpr {
    fn add_assign(&mut self, rhs: T) {
        let rhs = rhs.into();
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
    }
}

impl<T: Into<LinExpr>> SubAssign<T> for LinExpr {
    fn sub_assign(&mut self, rhs: T) {
        *self += -rhs.into();
    }
}

impl<T: Into<LinExpr>> Add<T> for LinExpr {
    type Output = LinExpr;

    fn add(mut self, rhs: T) -> LinExpr {
        self += rhs;
        self
    }
}

impl<T: Into<LinExpr>> Sub<T> for LinExpr {
    type Output = LinExpr;

    fn sub(mut self, rhs: T) -> LinExpr {
        self -= rhs;
        self
    }
}

impl<T: Into<LinExpr>> Add<T> for Var {
    type Output = LinExpr;

    fn add(self, rhs: T) -> LinExpr {
        LinExpr::from(self) + rhs
    }
}

impl<T: Into<LinExpr>> Sub<T> for Var {
    type Output = LinExpr;

    fn sub(self, rhs: T) -> LinExpr {
        LinExpr::from(self) - rhs
    }
}

impl Sum<LinExpr> for LinExpr {
    fn sum<I: Iterator<Item = LinExpr>>(iter: I) -> Self {
        let mut total = LinExpr::new();
        for expr in iter {
            total += expr;
        }
        total
    }
}

impl Sum<Var> for LinExpr {
    fn sum<I: Iterator<Item = Var>>(iter: I) -> Self {
        LinExpr {
            terms: iter.map(|var| (var, 1.0)).collect(),
            constant: 0.0,
        }
    }
}

impl<'a> Sum<&'a Var> for LinExpr {
    fn sum<I: Iterator<Item = &'a Var>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_builds_expected_terms() {
        let x = Var(0);
        let y = Var(1);
        let expr = 2.0 * x + y * 3.0 - 1.5 + x;
        assert_eq!(expr.terms(), &[(x, 2.0), (y, 3.0), (x, 1.0)]);
        assert_eq!(expr.constant_term(), -1.5);
        assert_eq!(expr.compacted(), vec![(x, 3.0), (y, 3.0)]);
    }

    #[test]
    fn cancelling_terms_are_dropped() {
        let x = Var(0);
        let y = Var(1);
        let expr = x + 0.0 * y - x;
        assert!(expr.compacted().is_empty());
    }

    #[test]
    fn subtraction_negates_whole_expression() {
        let x = Var(0);
        let y = Var(1);
        let expr = LinExpr::from(x) - (2.0 * y + 4.0);
        assert_eq!(expr.terms(), &[(x, 1.0), (y, -2.0)]);
        assert_eq!(expr.constant_term(), -4.0);
    }

    #[test]
    fn evaluate_uses_variable_positions() {
        let expr: LinExpr = [Var(0), Var(2)].iter().sum::<LinExpr>() * 2.0 + 1.0;
        assert_eq!(expr.evaluate(&[1.0, 100.0, 3.0]), 9.0);
    }

    #[test]
    fn empty_sum_is_the_zero_constant() {
        let expr: LinExpr = Vec::<LinExpr>::new().into_iter().sum();
        assert!(expr.terms().is_empty());
        assert_eq!(expr.evaluate(&[]), 0.0);
    }
}
