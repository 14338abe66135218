use super::Transducer;
use crate::Sequence;

/// Two transducers run one after the other. Created by [`chain`].
#[derive(Debug, Clone, Copy)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

/// Compose two transducers: the result applies `first`, then `second`.
pub fn chain<A, B>(first: A, second: B) -> Chain<A, B> {
    Chain { first, second }
}

pub fn chain3<A, B, C>(a: A, b: B, c: C) -> Chain<Chain<A, B>, C> {
    chain(chain(a, b), c)
}

pub fn chain4<A, B, C, D>(a: A, b: B, c: C, d: D) -> Chain<Chain<Chain<A, B>, C>, D> {
    chain(chain3(a, b, c), d)
}

impl<S, A, B> Transducer<S> for Chain<A, B>
where
    S: Sequence,
    A: Transducer<S>,
    B: Transducer<A::Output>,
{
    type Output = B::Output;

    fn apply(self, seq: S) -> B::Output {
        self.second.apply(self.first.apply(seq))
    }
}

/// Transducer that returns its source unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

pub fn identity() -> Identity {
    Identity
}

impl<S: Sequence> Transducer<S> for Identity {
    type Output = S;

    fn apply(self, seq: S) -> S {
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::{naturals, values},
        reducers::collect,
        transducers::{filter, map, skip, take},
    };

    #[test]
    fn test_chain_applies_in_order() {
        let tx = chain(take(3), map(|x: u64| x * 10));
        assert_eq!(collect(tx.apply(naturals())), vec![0, 10, 20]);

        let tx = chain(map(|x: u64| x * 10), take(3));
        assert_eq!(collect(tx.apply(naturals())), vec![0, 10, 20]);
    }

    #[test]
    fn test_chain3_and_chain4() {
        let tx = chain3(skip(1), filter(|x: &i32| x % 2 == 0), map(|x: i32| -x));
        assert_eq!(collect(tx.apply(values([2, 3, 4, 5, 6]))), vec![-4, -6]);

        let tx = chain4(identity(), skip(1), take(2), identity());
        assert_eq!(collect(tx.apply(values([1, 2, 3, 4]))), vec![2, 3]);
    }

    #[test]
    fn test_identity_passes_through() {
        let seq = identity().apply(values(["a", "b"]));
        assert_eq!(collect(seq), vec!["a", "b"]);
    }

    #[test]
    fn test_closure_is_a_transducer() {
        let tx = chain(|s: crate::build::Values<i32>| s.map(|x| x + 1), take(1));
        assert_eq!(collect(tx.apply(values([41, 50]))), vec![42]);
    }
}
