use crate::engine::Engine;
use crate::error::{RandomError, Result};

impl Engine {
    /// Shuffle `items` in place (Durstenfeld).
    ///
    /// Walks from the back, swapping each position with a uniformly chosen
    /// position at or before it. Consumes exactly `items.len()` draws.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut i = items.len();
        while i > 0 {
            let j = self.below(i);
            i -= 1;
            items.swap(i, j);
        }
    }

    /// Uniformly chosen element of `items`.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        if items.is_empty() {
            return Err(RandomError::EmptyInput);
        }
        Ok(&items[self.below(items.len())])
    }

    /// Element chosen with probability proportional to its weight.
    ///
    /// Weights must be non-negative; a negative or NaN weight is rejected
    /// before anything is drawn. If the scan runs past the last pair (all
    /// weights zero, an infinite weight, or rounding at the boundary) the
    /// draw is spent and `InvariantViolation` is returned.
    pub fn pick_weighted<'a, T>(&mut self, pairs: &'a [(f64, T)]) -> Result<&'a T> {
        if pairs.is_empty() {
            return Err(RandomError::EmptyInput);
        }
        if let Some((index, (weight, _))) = pairs
            .iter()
            .enumerate()
            .find(|(_, (weight, _))| weight.is_nan() || *weight < 0.0)
        {
            return Err(RandomError::InvalidArgument(format!(
                "weight {weight} at index {index} is not a non-negative number"
            )));
        }

        let total: f64 = pairs.iter().map(|(weight, _)| weight).sum();
        let mut choice = self.draw() * total;
        for (weight, item) in pairs {
            if choice < *weight {
                return Ok(item);
            }
            choice -= weight;
        }

        Err(RandomError::InvariantViolation("bad weights".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_golden() {
        let mut rng = Engine::new(42);
        let mut v: Vec<u32> = (0..10).collect();
        rng.shuffle(&mut v);
        assert_eq!(v, vec![6, 7, 2, 4, 1, 9, 3, 0, 8, 5]);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = Engine::new(42);

        let mut empty: Vec<u8> = vec![];
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec!['x'];
        rng.shuffle(&mut single);
        assert_eq!(single, vec!['x']);
    }

    #[test]
    fn test_shuffle_consumes_one_draw_per_item() {
        let mut rng = Engine::new(8);
        let mut reference = Engine::new(8);
        let mut v = [1, 2, 3, 4, 5];

        rng.shuffle(&mut v);
        for _ in 0..v.len() {
            reference.draw();
        }
        assert_eq!(rng, reference);
    }

    #[test]
    fn test_pick() {
        let mut rng = Engine::new(5);
        assert_eq!(rng.pick(&[10, 20, 30]), Ok(&10));
        assert_eq!(rng.pick(&[10, 20, 30]), Ok(&20));

        let empty: [i32; 0] = [];
        assert_eq!(rng.pick(&empty), Err(RandomError::EmptyInput));
    }

    #[test]
    fn test_pick_weighted_golden() {
        let mut rng = Engine::new(99);
        assert_eq!(rng.pick(&["a", "b", "c", "d"]), Ok(&"b"));
        assert_eq!(rng.pick_weighted(&[(1.0, 'a'), (3.0, 'b')]), Ok(&'b'));

        let mut rng = Engine::new(5);
        rng.draw();
        rng.draw();
        assert_eq!(
            rng.pick_weighted(&[(0.5, 'x'), (0.25, 'y'), (0.25, 'z')]),
            Ok(&'x')
        );
    }

    #[test]
    fn test_pick_weighted_errors() {
        let mut rng = Engine::new(1);

        let empty: [(f64, char); 0] = [];
        assert_eq!(rng.pick_weighted(&empty), Err(RandomError::EmptyInput));

        let before = rng.clone();
        let negative = [(1.0, 'a'), (-0.5, 'b')];
        assert!(matches!(
            rng.pick_weighted(&negative),
            Err(RandomError::InvalidArgument(_))
        ));
        let nan = [(f64::NAN, 'a')];
        assert!(matches!(
            rng.pick_weighted(&nan),
            Err(RandomError::InvalidArgument(_))
        ));
        assert_eq!(rng, before);

        let zeros = [(0.0, 'a'), (0.0, 'b')];
        assert_eq!(
            rng.pick_weighted(&zeros),
            Err(RandomError::InvariantViolation("bad weights".to_string()))
        );
    }

    #[test]
    fn test_pick_weighted_skips_zero_weight() {
        let mut rng = Engine::new(31);
        for _ in 0..1000 {
            let got = rng.pick_weighted(&[(0.0, 'a'), (2.0, 'b'), (0.0, 'c')]);
            assert_eq!(got, Ok(&'b'));
        }
    }
}
