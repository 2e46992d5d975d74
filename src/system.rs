//! Time derivative operator abstraction

/// A time derivative operator `f(t, y) -> y'`.
///
/// Implemented for every `FnMut(f64, &Y) -> Y + Send` closure, which is
/// the usual way to supply one. Evaluation may mutate internal scratch
/// (hence `&mut self`) but must behave as a pure function of `(t, y)`.
///
/// Parallel stepping clones the system once per worker so evaluations
/// never share state across threads. A system that must share heavy
/// internal state instead (an FFT plan, a large preassembled operator)
/// can make its handle type `Clone` over shared storage, taking on the
/// reentrancy obligation itself.
pub trait System<Y>: Send {
    /// Evaluate the time derivative at `(t, y)`
    fn eval(&mut self, t: f64, y: &Y) -> Y;
}

impl<Y, F> System<Y> for F
where
    F: FnMut(f64, &Y) -> Y + Send,
{
    fn eval(&mut self, t: f64, y: &Y) -> Y {
        self(t, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_as_system() {
        let mut f = |t: f64, y: &f64| t + 2.0 * y;
        assert_eq!(f.eval(1.0, &3.0), 7.0);
    }

    #[test]
    fn test_cloned_replicas_are_independent() {
        #[derive(Clone)]
        struct Decay {
            rate: f64,
            evals: usize,
        }

        impl System<f64> for Decay {
            fn eval(&mut self, _t: f64, y: &f64) -> f64 {
                self.evals += 1;
                -self.rate * y
            }
        }

        let mut a = Decay { rate: 2.0, evals: 0 };
        let mut b = a.clone();
        a.eval(0.0, &1.0);
        a.eval(0.0, &1.0);
        b.eval(0.0, &1.0);
        assert_eq!(a.evals, 2);
        assert_eq!(b.evals, 1);
    }
}
