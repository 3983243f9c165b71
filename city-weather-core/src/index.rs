//! Alphabetical index over the city catalog.
//!
//! The list is sorted by name and cut into runs sharing a first letter. Every run
//! gets a `[start, end)` range into the sorted list, which is what a scrolling view
//! needs to decide where the sticky letter headers go.

use crate::model::City;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedIndex {
    sorted_cities: Vec<City>,
    letters: Vec<char>,
    start_indexes: Vec<usize>,
    end_indexes: Vec<usize>,
}

impl GroupedIndex {
    /// Sort `cities` by name and compute the letter groups.
    ///
    /// Cities with an empty name are dropped. Equal names keep their input order.
    pub fn build(cities: impl IntoIterator<Item = City>) -> Self {
        let mut sorted_cities: Vec<City> =
            cities.into_iter().filter(|city| !city.city_name.is_empty()).collect();
        sorted_cities.sort_by(|a, b| a.city_name.cmp(&b.city_name));

        let mut letters = Vec::new();
        let mut start_indexes = Vec::new();
        let mut end_indexes = Vec::new();

        for (position, city) in sorted_cities.iter().enumerate() {
            let Some(letter) = city.city_name.chars().next() else {
                continue;
            };

            if letters.last() != Some(&letter) {
                if position > 0 {
                    end_indexes.push(position);
                }
                letters.push(letter);
                start_indexes.push(position);
            }
        }

        if !sorted_cities.is_empty() {
            end_indexes.push(sorted_cities.len());
        }

        Self {
            sorted_cities,
            letters,
            start_indexes,
            end_indexes,
        }
    }

    pub fn sorted_cities(&self) -> &[City] {
        &self.sorted_cities
    }

    /// Group letters in list order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn start_indexes(&self) -> &[usize] {
        &self.start_indexes
    }

    pub fn end_indexes(&self) -> &[usize] {
        &self.end_indexes
    }

    pub fn len(&self) -> usize {
        self.sorted_cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_cities.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.letters.len()
    }

    /// Iterate over `(letter, cities)` in alphabetical order.
    pub fn groups(&self) -> impl Iterator<Item = (char, &[City])> + '_ {
        self.letters
            .iter()
            .zip(self.start_indexes.iter().zip(&self.end_indexes))
            .map(|(&letter, (&start, &end))| (letter, &self.sorted_cities[start..end]))
    }

    /// Cities whose name starts with `letter`, if any.
    pub fn group(&self, letter: char) -> Option<&[City]> {
        self.groups().find(|(l, _)| *l == letter).map(|(_, cities)| cities)
    }

    /// Letter of the header that should be pinned while `position` is the top row.
    pub fn header_at(&self, position: usize) -> Option<char> {
        if position >= self.sorted_cities.len() {
            return None;
        }

        let group = self.end_indexes.partition_point(|&end| end <= position);
        self.letters.get(group).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::to_city;
    use crate::model::CityResponse;

    fn city(name: &str, id: &str) -> City {
        to_city(CityResponse {
            city_name: name.to_string(),
            id: id.to_string(),
            latitude: "0".into(),
            longitude: "0".into(),
        })
        .unwrap()
    }

    fn names(index: &GroupedIndex) -> Vec<&str> {
        index.sorted_cities().iter().map(|c| c.city_name.as_str()).collect()
    }

    fn assert_partitions(index: &GroupedIndex) {
        let starts = index.start_indexes();
        let ends = index.end_indexes();

        assert_eq!(starts.len(), ends.len());
        assert_eq!(starts.len(), index.group_count());
        assert_eq!(starts[0], 0);
        assert_eq!(*ends.last().unwrap(), index.len());
        for i in 0..starts.len() - 1 {
            assert_eq!(starts[i + 1], ends[i]);
        }
        for (letter, cities) in index.groups() {
            assert!(!cities.is_empty());
            assert!(cities.iter().all(|c| c.first_char == letter));
        }
    }

    #[test]
    fn cyrillic_catalog() {
        let index = GroupedIndex::build(vec![
            city("Заринск", "1"),
            city("Зея", "2"),
            city("Абакан", "3"),
        ]);

        assert_eq!(names(&index), ["Абакан", "Заринск", "Зея"]);
        assert_eq!(index.letters(), ['А', 'З']);
        assert_eq!(index.start_indexes(), [0, 1]);
        assert_eq!(index.end_indexes(), [1, 3]);
        assert_eq!(index.group('А').map(<[City]>::len), Some(1));
        assert_eq!(index.group('З').map(<[City]>::len), Some(2));
        assert_partitions(&index);
    }

    #[test]
    fn groups_partition_a_larger_catalog() {
        let index = GroupedIndex::build(
            ["Omsk", "Moscow", "Murmansk", "Abakan", "Oryol", "Kazan", "Kursk", "Magadan", "Anapa"]
                .iter()
                .enumerate()
                .map(|(i, n)| city(n, &i.to_string())),
        );

        assert_eq!(index.letters(), ['A', 'K', 'M', 'O']);
        assert_eq!(index.start_indexes(), [0, 2, 4, 7]);
        assert_eq!(index.end_indexes(), [2, 4, 7, 9]);
        assert_partitions(&index);
    }

    #[test]
    fn regrouping_sorted_output_is_idempotent() {
        let first = GroupedIndex::build(vec![
            city("Томск", "1"),
            city("Тула", "2"),
            city("Абакан", "3"),
            city("Ейск", "4"),
        ]);
        let second = GroupedIndex::build(first.sorted_cities().to_vec());

        assert_eq!(first.start_indexes(), second.start_indexes());
        assert_eq!(first.end_indexes(), second.end_indexes());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_names_are_filtered() {
        let blank = City {
            city_name: String::new(),
            first_char: ' ',
            id: "0".into(),
            latitude: "0".into(),
            longitude: "0".into(),
        };
        let index = GroupedIndex::build(vec![blank, city("Зея", "1")]);

        assert_eq!(names(&index), ["Зея"]);
        assert!(index.sorted_cities().iter().all(|c| !c.city_name.is_empty()));
        assert_partitions(&index);
    }

    #[test]
    fn duplicate_names_keep_input_order() {
        let index = GroupedIndex::build(vec![
            city("Троицк", "moscow-region"),
            city("Абакан", "a"),
            city("Троицк", "chelyabinsk-region"),
        ]);

        let ids: Vec<&str> = index
            .sorted_cities()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "moscow-region", "chelyabinsk-region"]);
        assert_partitions(&index);
    }

    #[test]
    fn case_is_not_folded() {
        let index = GroupedIndex::build(vec![city("зея", "1"), city("Зея", "2")]);

        assert_eq!(index.letters(), ['З', 'з']);
        assert_eq!(index.start_indexes(), [0, 1]);
        assert_eq!(index.end_indexes(), [1, 2]);
    }

    #[test]
    fn empty_catalog_has_no_groups() {
        let index = GroupedIndex::build(Vec::new());

        assert!(index.is_empty());
        assert!(index.start_indexes().is_empty());
        assert!(index.end_indexes().is_empty());
        assert_eq!(index.groups().count(), 0);
        assert_eq!(index.header_at(0), None);
    }

    #[test]
    fn header_follows_scroll_position() {
        let index = GroupedIndex::build(vec![
            city("Заринск", "1"),
            city("Зея", "2"),
            city("Абакан", "3"),
        ]);

        assert_eq!(index.header_at(0), Some('А'));
        assert_eq!(index.header_at(1), Some('З'));
        assert_eq!(index.header_at(2), Some('З'));
        assert_eq!(index.header_at(3), None);
    }

    #[test]
    fn missing_letter_has_no_group() {
        let index = GroupedIndex::build(vec![city("Абакан", "1")]);
        assert!(index.group('Я').is_none());
    }
}
