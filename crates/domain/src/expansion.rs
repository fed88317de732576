use crate::{
    BlueprintItem, DayNumber, LogEntry, Occurrences, SetNumber, ValidationError, WorkoutID,
};

/// Expands a workout plan into its full set of log entries, one per item,
/// day and set. Weight and reps start empty, nothing is completed.
///
/// Entries are ordered by item input order, then day, then set.
pub fn expand(
    workout_id: WorkoutID,
    items: &[BlueprintItem],
    occurrences: Occurrences,
) -> Result<Vec<LogEntry>, ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyPlan);
    }

    let days = DayNumber::sequence(occurrences).collect::<Vec<_>>();

    Ok(items
        .iter()
        .flat_map(|item| expand_item(workout_id, item, &days))
        .collect())
}

/// Expands a single item onto the given days.
#[must_use]
pub fn expand_item(workout_id: WorkoutID, item: &BlueprintItem, days: &[DayNumber]) -> Vec<LogEntry> {
    days.iter()
        .flat_map(|day| {
            SetNumber::sequence(item.sets).map(|set| LogEntry {
                workout_id,
                exercise_id: item.exercise_id,
                day: *day,
                set,
                order: item.order.clone(),
                target_reps: item.target_reps.clone(),
                tempo: item.tempo.clone(),
                rest: item.rest,
                notes: item.notes.clone(),
                weight: None,
                reps: None,
                completed: false,
                video_url: None,
                coach_comment: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{OrderToken, Sets, TargetReps, Tempo, blueprint::Rest};

    use super::*;

    fn item(exercise_id: u128, order: &str, sets: u32) -> BlueprintItem {
        BlueprintItem {
            exercise_id: exercise_id.into(),
            order: OrderToken::new(order).unwrap(),
            sets: Sets::new(sets).unwrap(),
            target_reps: TargetReps::new("8-12").unwrap(),
            tempo: Tempo::new("2-0-2").unwrap(),
            rest: Rest::new(90).unwrap(),
            notes: String::new(),
        }
    }

    #[rstest]
    #[case(&[(2, "A", 3)], 1, 3)]
    #[case(&[(2, "A", 3)], 4, 12)]
    #[case(&[(2, "A", 3), (3, "B", 1)], 2, 8)]
    #[case(&[(2, "A", 1), (3, "B", 1), (4, "C", 5)], 3, 21)]
    fn test_expand_row_count(
        #[case] items: &[(u128, &str, u32)],
        #[case] occurrences: u32,
        #[case] expected: usize,
    ) {
        let items = items
            .iter()
            .map(|(id, order, sets)| item(*id, order, *sets))
            .collect::<Vec<_>>();
        let entries = expand(
            1.into(),
            &items,
            Occurrences::new(occurrences).unwrap(),
        )
        .unwrap();

        assert_eq!(entries.len(), expected);
    }

    #[test]
    fn test_expand_coordinates_and_defaults() {
        let entries = expand(
            1.into(),
            &[item(2, "A", 2), item(3, "B", 1)],
            Occurrences::new(2).unwrap(),
        )
        .unwrap();

        let coordinates = entries
            .iter()
            .map(|e| {
                (
                    u128::from_be_bytes(*e.exercise_id.as_bytes()),
                    u32::from(e.day),
                    u32::from(e.set),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            coordinates,
            vec![
                (2, 1, 1),
                (2, 1, 2),
                (2, 2, 1),
                (2, 2, 2),
                (3, 1, 1),
                (3, 2, 1),
            ]
        );

        for entry in &entries {
            assert_eq!(entry.weight, None);
            assert_eq!(entry.reps, None);
            assert!(!entry.completed);
            assert_eq!(entry.video_url, None);
            assert_eq!(entry.coach_comment, None);
        }
    }

    #[test]
    fn test_expand_copies_planning_fields() {
        let planned = item(2, "A1", 1);
        let entries = expand(1.into(), &[planned.clone()], Occurrences::new(1).unwrap()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].order, planned.order);
        assert_eq!(entries[0].target_reps, planned.target_reps);
        assert_eq!(entries[0].tempo, planned.tempo);
        assert_eq!(entries[0].rest, planned.rest);
    }

    #[test]
    fn test_expand_empty_plan() {
        assert!(matches!(
            expand(1.into(), &[], Occurrences::new(1).unwrap()),
            Err(ValidationError::EmptyPlan)
        ));
    }
}
