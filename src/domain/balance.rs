use super::{Amount, Payer, Purchase};

/// Who owes what, derived from the full purchase list.
///
/// Joint purchases are split evenly; purchases whose `who` is not a known
/// payer are ignored entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BalanceSummary {
    pub joe_independent: Amount,
    pub kath_independent: Amount,
    pub joint_total: Amount,
    pub joe_owes: Amount,
    pub kath_owes: Amount,
}

impl BalanceSummary {
    pub fn compute(purchases: &[Purchase]) -> Self {
        let mut summary = Self::default();

        for purchase in purchases {
            match purchase.payer() {
                Some(Payer::Joe) => summary.joe_independent += purchase.amount,
                Some(Payer::Kath) => summary.kath_independent += purchase.amount,
                Some(Payer::Joint) => summary.joint_total += purchase.amount,
                None => {}
            }
        }

        let half_joint = summary.joint_total / 2.0;
        summary.joe_owes = summary.joe_independent + half_joint;
        summary.kath_owes = summary.kath_independent + half_joint;
        summary
    }

    /// Sum of every counted purchase. Always equals `joe_owes + kath_owes`.
    pub fn counted_total(&self) -> Amount {
        self.joe_independent + self.kath_independent + self.joint_total
    }
}
