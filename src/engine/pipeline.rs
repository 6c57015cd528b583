//! Kanban board projection and stage moves.

use crate::domain::{Deal, Decimal, Stage};
use serde::Serialize;

/// One board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageColumn<'a> {
    pub stage: Stage,
    pub label: &'static str,
    pub count: usize,
    pub total_value: Decimal,
    pub deals: Vec<&'a Deal>,
}

/// Group deals into one column per stage, in pipeline order.
/// Empty stages still get a column; deals keep their source order.
pub fn board<'a, I>(deals: I) -> Vec<StageColumn<'a>>
where
    I: IntoIterator<Item = &'a Deal>,
{
    let mut columns: Vec<StageColumn<'a>> = Stage::ALL
        .into_iter()
        .map(|stage| StageColumn {
            stage,
            label: stage.label(),
            count: 0,
            total_value: Decimal::zero(),
            deals: Vec::new(),
        })
        .collect();

    for deal in deals {
        let column = &mut columns[deal.stage.position()];
        column.count += 1;
        column.total_value = column.total_value + deal.value;
        column.deals.push(deal);
    }

    columns
}

/// Replacement record for a deal dropped onto `stage`.
pub fn move_deal(deal: &Deal, stage: Stage) -> Deal {
    Deal {
        stage,
        ..deal.clone()
    }
}
