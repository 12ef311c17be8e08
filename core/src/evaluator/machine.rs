use crate::evaluator::Status;
use crate::evaluator::operators::eval_binary_float;
use crate::parser::BinaryOp;
use crate::stack::{self, Stack};

/// Tunables for [`Evaluator`] construction.
#[derive(Debug, Clone)]
pub struct EvaluatorOptions {
    /// Slots pre-allocated for the operand stack.
    pub initial_capacity: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            initial_capacity: stack::DEFAULT_CAPACITY,
        }
    }
}

/// The postfix value-stack machine.
///
/// Owns a stack of `f64` operands and a latched [`Status`] register.
/// Operands go on with [`push`](Evaluator::push), operators consume the
/// top two with [`apply`](Evaluator::apply) (or the per-operator
/// shorthands), and the outcome of the most recent fallible step is read
/// back with [`status`](Evaluator::status).
///
/// Dropping the evaluator releases the backing buffer; there is no
/// separate teardown step.
///
/// # Examples
///
/// ```ignore
/// use revpol_core::evaluator::{Evaluator, Status};
///
/// let mut eval = Evaluator::new();
/// eval.push(1.0);
/// eval.push(2.0);
/// eval.add();
/// assert_eq!(eval.status(), Status::Ok);
/// assert_eq!(eval.pop(), 3.0);
/// ```
pub struct Evaluator {
    stack: Stack<f64>,
    status: Status,
}

impl Evaluator {
    /// Creates an evaluator with default options: an empty stack with
    /// the default pre-allocated capacity and an `Ok` latch.
    pub fn new() -> Self {
        Self::with_options(EvaluatorOptions::default())
    }

    /// Creates an evaluator with explicit options.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use revpol_core::evaluator::{Evaluator, EvaluatorOptions};
    ///
    /// let eval = Evaluator::with_options(EvaluatorOptions { initial_capacity: 16 });
    /// assert_eq!(eval.capacity(), 16);
    /// ```
    pub fn with_options(options: EvaluatorOptions) -> Self {
        Self {
            stack: Stack::with_capacity(options.initial_capacity),
            status: Status::Ok,
        }
    }

    /// Pushes an operand onto the stack and latches `Ok`.
    ///
    /// Growth is handled by the stack's doubling policy; a push never
    /// fails.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.stack.push(value);
        self.set_status(Status::Ok);
    }

    /// Removes and returns the top operand.
    ///
    /// Does not touch the status latch.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty. An underflowing pop is a caller
    /// bug, not a latched arithmetic condition.
    #[inline]
    pub fn pop(&mut self) -> f64 {
        match self.stack.pop() {
            Some(value) => value,
            None => panic!("pop on empty evaluator stack"),
        }
    }

    /// Applies a binary operator to the top two operands.
    ///
    /// Pops `b` (top) then `a` and pushes `a op b` on success, latching
    /// `Ok`. Failure cases:
    ///
    /// - fewer than two operands: latches [`Status::Binary`], the stack
    ///   is left untouched.
    /// - division with a zero divisor (`-0.0` included): latches
    ///   [`Status::DivisionByZero`]; both operands stay consumed and no
    ///   result is pushed.
    /// - non-finite result (infinity or NaN): latches
    ///   [`Status::Overflow`]; operands consumed, nothing pushed.
    pub fn apply(&mut self, op: BinaryOp) {
        let (a, b) = match self.stack.top_n(2) {
            Some(&[a, b]) => (a, b),
            _ => {
                self.set_status(Status::Binary);
                return;
            }
        };
        self.stack.truncate_top(2);

        if op == BinaryOp::Div && b == 0.0 {
            self.set_status(Status::DivisionByZero);
            return;
        }

        let result = eval_binary_float(op, a, b);
        if !result.is_finite() {
            self.set_status(Status::Overflow);
            return;
        }

        self.stack.push(result);
        self.set_status(Status::Ok);
    }

    /// Shorthand for [`apply`](Evaluator::apply) with [`BinaryOp::Add`].
    #[inline]
    pub fn add(&mut self) {
        self.apply(BinaryOp::Add);
    }

    /// Shorthand for [`apply`](Evaluator::apply) with [`BinaryOp::Sub`].
    #[inline]
    pub fn sub(&mut self) {
        self.apply(BinaryOp::Sub);
    }

    /// Shorthand for [`apply`](Evaluator::apply) with [`BinaryOp::Mul`].
    #[inline]
    pub fn mul(&mut self) {
        self.apply(BinaryOp::Mul);
    }

    /// Shorthand for [`apply`](Evaluator::apply) with [`BinaryOp::Div`].
    #[inline]
    pub fn div(&mut self) {
        self.apply(BinaryOp::Div);
    }

    /// Reads the status latch. Never modifies it; repeated reads return
    /// the same value.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of operands currently on the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// `true` if no operands are on the stack.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The top operand without removing it, or `None` when empty.
    #[inline]
    pub fn peek(&self) -> Option<f64> {
        self.stack.peek().copied()
    }

    /// Current operand buffer capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.stack.capacity()
    }

    /// The operands bottom to top.
    #[inline]
    pub fn operands(&self) -> &[f64] {
        self.stack.as_slice()
    }

    /// Drops all operands and resets the latch to `Ok`. The backing
    /// buffer is kept.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.status = Status::Ok;
    }

    fn set_status(&mut self, status: Status) {
        if status.is_err() {
            tracing::debug!(?status, depth = self.stack.len(), "evaluator latched error");
        }
        self.status = status;
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
