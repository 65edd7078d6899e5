//! Step-wise execution of long running algorithms.
//!
//! An algorithm implementing [`IterativeAlgorithm`] does a bounded amount of work per call of
//! [`IterativeAlgorithm::execute_step`] and then returns control to the caller, which may
//! inspect intermediate state, log progress or decide to stop.

/// [`IterativeAlgorithm`] provides a consistent interface to execute algorithms step by
/// step. It does not prescribe any constructor; construction should be cheap.
///
/// As an adopter of [`IterativeAlgorithm`], you have to implement at least the methods
///   [`IterativeAlgorithm::execute_step`],
///   [`IterativeAlgorithm::is_completed`] and [`IterativeAlgorithm::current_solution`].
///
/// If your algorithm is known to eventually terminate please also implement the marker trait
/// [`TerminatingIterativeAlgorithm`]. It offers an easy interface to run the algorithm to
/// completion.
///
/// # Example
/// ```
/// use qiro::algorithm::IterativeAlgorithm;
///
/// struct CountDown {
///     remaining: u32,
///     steps: u32,
/// }
///
/// impl IterativeAlgorithm for CountDown {
///     type Solution = u32;
///     type Error = std::convert::Infallible;
///
///     fn execute_step(&mut self) -> Result<(), Self::Error> {
///         self.remaining -= 1;
///         self.steps += 1;
///         Ok(())
///     }
///
///     fn is_completed(&self) -> bool {
///         self.remaining == 0
///     }
///
///     fn current_solution(&self) -> &u32 {
///         &self.steps
///     }
/// }
///
/// let mut algo = CountDown { remaining: 5, steps: 0 };
/// algo.run_while(|a| a.steps < 2).unwrap();
/// assert_eq!(*algo.current_solution(), 2);
/// ```
pub trait IterativeAlgorithm {
    type Solution;
    type Error;

    /// Advances the computation of this algorithm by one step
    fn execute_step(&mut self) -> Result<(), Self::Error>;

    /// Returns true iff the algorithm is completed and [`IterativeAlgorithm::execute_step`] may not
    /// be called again.
    fn is_completed(&self) -> bool;

    /// Returns the solution accumulated so far
    fn current_solution(&self) -> &Self::Solution;

    /// Keeps calling [`IterativeAlgorithm::execute_step`] until the `predicate` becomes false,
    /// a step fails, or [`IterativeAlgorithm::is_completed`] becomes true. The function
    /// `predicate` is evaluated after each iteration, i.e. a step is carried out even if the
    /// predicate always returns false.
    fn run_while<F: FnMut(&mut Self) -> bool>(&mut self, mut predicate: F) -> Result<(), Self::Error> {
        while !self.is_completed() {
            self.execute_step()?;

            if !predicate(self) {
                break;
            }
        }

        Ok(())
    }
}

/// [`TerminatingIterativeAlgorithm`] is a marker trait, i.e. to adopt it, you give an empty `impl`
/// block. Add this trait to algorithms that will eventually terminate.
pub trait TerminatingIterativeAlgorithm: IterativeAlgorithm {
    /// Execute the algorithm until it completed and return the solution
    fn run_to_completion(&mut self) -> Result<&Self::Solution, Self::Error> {
        while !self.is_completed() {
            self.execute_step()?;
        }
        Ok(self.current_solution())
    }
}
