//! Proptest generators for property-based testing.

use proptest::prelude::*;

use petstore_core::{Column, Filter, Gender, PetValues, SortOrder, Value};

/// Generate a non-empty pet name.
pub fn name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,11}".prop_map(String::from)
}

/// Generate a breed, sometimes empty.
pub fn breed() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Z][a-z ]{0,15}".prop_map(String::from),
    ]
}

/// Generate a Gender.
pub fn gender() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Unknown),
        Just(Gender::Male),
        Just(Gender::Female),
    ]
}

/// Generate a gender code that is not one of the three valid ones.
pub fn invalid_gender_code() -> impl Strategy<Value = i32> {
    prop_oneof![i32::MIN..0, 3..=i32::MAX]
}

/// Generate a valid weight.
pub fn weight() -> impl Strategy<Value = i32> {
    0i32..=200
}

/// Values that pass insert validation.
pub fn valid_insert() -> impl Strategy<Value = PetValues> {
    (
        name(),
        proptest::option::of(breed()),
        gender(),
        proptest::option::of(weight()),
    )
        .prop_map(|(name, breed, gender, weight)| PetValues {
            name: Some(name),
            breed,
            gender: Some(gender.code()),
            weight,
        })
}

/// Values that fail insert validation in exactly one way.
pub fn invalid_insert() -> impl Strategy<Value = PetValues> {
    valid_insert().prop_flat_map(|values| {
        prop_oneof![
            Just(PetValues {
                name: None,
                ..values.clone()
            }),
            Just(PetValues {
                name: Some(String::new()),
                ..values.clone()
            }),
            Just(PetValues {
                gender: None,
                ..values.clone()
            }),
            invalid_gender_code().prop_map({
                let values = values.clone();
                move |code| values.clone().gender_code(code)
            }),
            (i32::MIN..0).prop_map({
                let values = values.clone();
                move |w| values.clone().weight(w)
            }),
        ]
    })
}

/// Values that pass update validation: any subset of valid fields.
pub fn valid_update() -> impl Strategy<Value = PetValues> {
    (
        proptest::option::of(name()),
        proptest::option::of(breed()),
        proptest::option::of(gender()),
        proptest::option::of(weight()),
    )
        .prop_map(|(name, breed, gender, weight)| PetValues {
            name,
            breed,
            gender: gender.map(Gender::code),
            weight,
        })
}

/// Generate a column.
pub fn column() -> impl Strategy<Value = Column> {
    proptest::sample::select(Column::ALL.to_vec())
}

/// Generate a comparison value, including type mismatches and null.
pub fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (-5i64..=210).prop_map(Value::Integer),
        name().prop_map(Value::Text),
        breed().prop_map(Value::Text),
    ]
}

/// Generate a filter of up to three predicates.
pub fn filter() -> impl Strategy<Value = Filter> {
    proptest::collection::vec((column(), 0usize..6, value()), 0..=3).prop_map(|preds| {
        preds
            .into_iter()
            .fold(Filter::all(), |filter, (column, op, value)| match op {
                0 => filter.equals(column, value),
                1 => filter.not_equals(column, value),
                2 => filter.less_than(column, value),
                3 => filter.at_most(column, value),
                4 => filter.greater_than(column, value),
                _ => filter.at_least(column, value),
            })
    })
}

/// Generate a sort order of up to two keys.
pub fn sort_order() -> impl Strategy<Value = SortOrder> {
    proptest::collection::vec((column(), any::<bool>()), 0..=2).prop_map(|keys| {
        keys.into_iter()
            .fold(SortOrder::none(), |order, (column, descending)| {
                if descending {
                    order.desc(column)
                } else {
                    order.asc(column)
                }
            })
    })
}

/// Generate a projection; empty means every column.
pub fn projection() -> impl Strategy<Value = Vec<Column>> {
    proptest::sample::subsequence(Column::ALL.to_vec(), 0..=Column::ALL.len())
}
