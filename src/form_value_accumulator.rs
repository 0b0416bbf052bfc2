/// The multi-valued key/value store built from form-field parts.
///
/// Keys are case-sensitive and enumerated in first-insertion order; the values of one
/// key keep their submission order. The array marker (`[]`) is expected to have been
/// stripped from keys before they get here, so `color[]` and `color` share one list.
#[derive(Debug, Clone, Default)]
pub struct FormValueAccumulator {
    entries: Vec<(String, Vec<String>)>,
    value_count: usize,
}

impl FormValueAccumulator {
    /// Create an empty `FormValueAccumulator`.
    #[inline]
    pub fn new() -> FormValueAccumulator {
        FormValueAccumulator {
            entries: Vec::new(),
            value_count: 0,
        }
    }

    /// Append one value under a key, keeping submission order.
    pub fn append(&mut self, key: String, value: String) {
        self.value_count += 1;

        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(index) => self.entries[index].1.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// The values accumulated for a key, in submission order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, values)| values.as_slice())
    }

    /// The total number of values appended across all keys.
    #[inline]
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    /// The number of distinct keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the keys and their value lists in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_share_one_ordered_list() {
        let mut accumulator = FormValueAccumulator::new();

        accumulator.append(String::from("color"), String::from("red"));
        accumulator.append(String::from("size"), String::from("xl"));
        accumulator.append(String::from("color"), String::from("green"));
        accumulator.append(String::from("color"), String::from("blue"));

        assert_eq!(4, accumulator.value_count());
        assert_eq!(2, accumulator.len());
        assert_eq!(
            Some(&[String::from("red"), String::from("green"), String::from("blue")][..]),
            accumulator.get("color")
        );
        assert_eq!(None, accumulator.get("Color"));
    }

    #[test]
    fn keys_enumerate_in_first_insertion_order() {
        let mut accumulator = FormValueAccumulator::new();

        accumulator.append(String::from("b"), String::from("1"));
        accumulator.append(String::from("a"), String::from("2"));
        accumulator.append(String::from("b"), String::from("3"));

        let keys: Vec<&str> = accumulator.iter().map(|(key, _)| key).collect();

        assert_eq!(vec!["b", "a"], keys);
    }
}
