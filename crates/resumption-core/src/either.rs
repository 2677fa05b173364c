//! Binary sums for "answer or next layer" decisions

/// A left value, by convention a final answer, or a right value holding the
/// remaining structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Either<A, B> {
    Left(A),
    Right(B),
}

impl<A, B> Either<A, B> {
    /// Case analysis
    pub fn either<C, L, R>(self, on_left: L, on_right: R) -> C
    where
        L: FnOnce(A) -> C,
        R: FnOnce(B) -> C,
    {
        match self {
            Either::Left(a) => on_left(a),
            Either::Right(b) => on_right(b),
        }
    }

    /// Map the right side, keeping a left value untouched
    pub fn map_right<C>(self, f: impl FnOnce(B) -> C) -> Either<A, C> {
        self.either(Either::Left, |b| Either::Right(f(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_either_picks_one_case() {
        let answer: Either<u8, &str> = Either::Left(4);
        assert_eq!(answer.either(u32::from, |s| s.len() as u32), 4);

        let rest: Either<u8, &str> = Either::Right("abc");
        assert_eq!(rest.either(u32::from, |s| s.len() as u32), 3);
    }

    #[test]
    fn test_map_right_leaves_answers_alone() {
        let answer: Either<u8, &str> = Either::Left(2);
        assert_eq!(answer.map_right(str::len), Either::Left(2));

        let rest: Either<u8, &str> = Either::Right("abc");
        assert_eq!(rest.map_right(str::len), Either::Right(3));
    }
}
