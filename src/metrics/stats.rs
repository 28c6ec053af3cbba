/// Arithmetic mean; absent for an empty sample
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (n - 1 denominator); absent below two values
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Values grouped by key, keeping keys in first-appearance order
#[derive(Debug, Clone)]
pub struct Groups<K> {
    keys: Vec<K>,
    values: Vec<Vec<f64>>,
}

impl<K: PartialEq> Groups<K> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, key: K, value: f64) {
        match self.keys.iter().position(|k| *k == key) {
            Some(i) => self.values[i].push(value),
            None => {
                self.keys.push(key);
                self.values.push(vec![value]);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[f64])> {
        self.keys.iter().zip(self.values.iter().map(|v| v.as_slice()))
    }
}

impl<K: PartialEq> Default for Groups<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 5.0]), Some(3.0));
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[]), None);
        assert_eq!(sample_std_dev(&[4.0]), None);
        let sd = sample_std_dev(&[1.0, 5.0]).unwrap();
        assert!((sd - 8.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(sample_std_dev(&[3.0, 3.0, 3.0]), Some(0.0));
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let mut groups = Groups::new();
        groups.push("b", 1.0);
        groups.push("a", 2.0);
        groups.push("b", 3.0);
        let collected: Vec<(&str, Vec<f64>)> =
            groups.iter().map(|(k, v)| (*k, v.to_vec())).collect();
        assert_eq!(collected, vec![("b", vec![1.0, 3.0]), ("a", vec![2.0])]);
    }
}
