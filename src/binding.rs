//! Argument binding.
//!
//! A batch runs callables of one signature `(A1, …, Ak) -> R`. The runner
//! stores them uniformly as [`TaskFn<(A1, …, Ak)>`](TaskFn) trait objects and
//! hands every slot its own copy of the argument tuple.
//!
//! [`TaskFn`] is implemented for every `Fn` of up to eight arguments, so plain
//! functions, non-capturing closures and boxed `dyn Fn` values can all be
//! installed without wrappers.

/// A callable invoked with one argument tuple.
pub trait TaskFn<Args> {
    /// Value produced by the call.
    type Output;

    /// Invokes the callable, spreading `args` into positional parameters.
    fn call(&self, args: Args) -> Self::Output;
}

macro_rules! impl_task_fn {
    ($($ty:ident $val:ident),*) => {
        impl<Func, Ret, $($ty,)*> TaskFn<($($ty,)*)> for Func
        where
            Func: Fn($($ty),*) -> Ret,
        {
            type Output = Ret;

            fn call(&self, ($($val,)*): ($($ty,)*)) -> Ret {
                (self)($($val),*)
            }
        }
    };
}

impl_task_fn!();
impl_task_fn!(A1 a1);
impl_task_fn!(A1 a1, A2 a2);
impl_task_fn!(A1 a1, A2 a2, A3 a3);
impl_task_fn!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_task_fn!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_task_fn!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_task_fn!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_task_fn!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);

/// Type-erased task stored in a slot.
pub(crate) type BoxedTask<Args, R> = Box<dyn TaskFn<Args, Output = R> + Send>;

/// Binds `args` once per task.
///
/// Returns `copies` independent values: `copies - 1` clones followed by the
/// original. All copies exist before any task runs, so a task that mutates
/// its own copy is never observed by another slot. Reference-like values
/// (`Arc`, `&T`) clone as handles and remain shared.
pub fn bind<Args: Clone>(args: Args, copies: usize) -> Vec<Args> {
    let mut bound = Vec::with_capacity(copies);

    if copies == 0 {
        return bound;
    }

    for _ in 1..copies {
        bound.push(args.clone());
    }
    bound.push(args);

    bound
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    fn add(x: i32, y: i32) -> i32 {
        x + y
    }

    #[test]
    fn spreads_tuple_into_parameters() {
        assert_eq!(TaskFn::call(&add, (5, 10)), 15);
        assert_eq!(TaskFn::call(&|| 7, ()), 7);
        assert_eq!(TaskFn::call(&|x: u8| x * 2, (21,)), 42);

        let eight = |a: i32, b: i32, c: i32, d: i32, e: i32, f: i32, g: i32, h: i32| {
            a + b + c + d + e + f + g + h
        };
        assert_eq!(TaskFn::call(&eight, (1, 2, 3, 4, 5, 6, 7, 8)), 36);
    }

    #[test]
    fn boxed_closures_are_tasks() {
        let offset = 3;
        let boxed: Box<dyn Fn(i32) -> i32 + Send> = Box::new(move |x| x + offset);
        let erased: BoxedTask<(i32,), i32> = Box::new(boxed);

        assert_eq!(TaskFn::call(&*erased, (4,)), 7);
    }

    #[test]
    fn bind_produces_independent_copies() {
        let mut bound = bind(vec![1, 2, 3], 3);
        assert_eq!(bound.len(), 3);

        bound[0].push(4);
        assert_eq!(bound[1], vec![1, 2, 3]);
        assert_eq!(bound[2], vec![1, 2, 3]);
    }

    #[test]
    fn bind_shares_handles() {
        let shared = Arc::new(5);
        let bound = bind(shared.clone(), 4);

        assert_eq!(Arc::strong_count(&shared), 5);
        assert!(bound.iter().all(|copy| Arc::ptr_eq(copy, &shared)));
    }

    #[test]
    fn bind_zero_copies_drops_args() {
        assert!(bind(String::from("unused"), 0).is_empty());
    }
}
