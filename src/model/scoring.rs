use crate::model::structures::finish_condition::FinishCondition;

/// Points awarded for one match. Only the winning side scores; draws award
/// nothing to either side.
pub fn points_for(finish: FinishCondition, is_winning_side: bool) -> i32 {
    if !is_winning_side {
        return 0;
    }

    match finish {
        FinishCondition::Survivor => 1,
        FinishCondition::Knockout => 2,
        FinishCondition::Burst => 2,
        FinishCondition::Extreme => 3,
        FinishCondition::Draw => 0
    }
}
