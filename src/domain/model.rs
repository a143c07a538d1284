use crate::domain::money::{Money, Profit, ProfitRate};
use crate::utils::error::{OptimizerError, Result};
use serde::Serialize;

/// A single investable line item. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    name: String,
    cost: Money,
    profit_rate: ProfitRate,
    profit: Profit,
}

impl Item {
    pub fn new(name: impl Into<String>, cost: Money, profit_rate: ProfitRate) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OptimizerError::InvalidItem {
                row: 0,
                reason: "name cannot be empty".to_string(),
            });
        }
        if !cost.is_positive() {
            return Err(OptimizerError::InvalidItem {
                row: 0,
                reason: format!("cost of '{}' must be positive, got {}", name, cost),
            });
        }
        let profit = profit_rate
            .profit_on(cost)
            .ok_or_else(|| OptimizerError::ArithmeticOverflow {
                context: format!("computing the profit of '{}'", name),
            })?;

        Ok(Self {
            name,
            cost,
            profit_rate,
            profit,
        })
    }

    /// Convenience constructor from decimal strings, e.g. `Item::parse("A", "100", "20")`.
    pub fn parse(name: impl Into<String>, cost: &str, profit_rate: &str) -> Result<Self> {
        Self::new(name, Money::parse(cost)?, ProfitRate::parse(profit_rate)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn profit_rate(&self) -> ProfitRate {
        self.profit_rate
    }

    /// `cost * profit_rate / 100`, exact in micro-units.
    pub fn profit(&self) -> Profit {
        self.profit
    }
}

/// Ordered candidate items. Order is source order and drives tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn total_cost(&self) -> Result<Money> {
        self.items.iter().try_fold(Money::ZERO, |acc, item| {
            acc.checked_add(item.cost())
                .ok_or_else(|| OptimizerError::ArithmeticOverflow {
                    context: "summing catalog costs".to_string(),
                })
        })
    }
}

impl From<Vec<Item>> for Catalog {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Result of a solve. `chosen` and `indices` are always in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub chosen: Vec<Item>,
    pub indices: Vec<usize>,
    pub total_cost: Money,
    pub total_profit: Profit,
}

impl Solution {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a solution from catalog indices, summing with overflow checks.
    /// `indices` must be ascending.
    pub fn from_indices(catalog: &Catalog, indices: Vec<usize>) -> Result<Self> {
        let overflow = |what: &str| OptimizerError::ArithmeticOverflow {
            context: format!("summing solution {}", what),
        };

        let mut chosen = Vec::with_capacity(indices.len());
        let mut total_cost = Money::ZERO;
        let mut total_profit = Profit::ZERO;
        for &index in &indices {
            let item = catalog.get(index).ok_or_else(|| OptimizerError::TaskError {
                message: format!("item index {} is out of bounds", index),
            })?;
            total_cost = total_cost
                .checked_add(item.cost())
                .ok_or_else(|| overflow("costs"))?;
            total_profit = total_profit
                .checked_add(item.profit())
                .ok_or_else(|| overflow("profits"))?;
            chosen.push(item.clone());
        }

        Ok(Self {
            chosen,
            indices,
            total_cost,
            total_profit,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_rejects_non_positive_cost() {
        let rate = ProfitRate::from_basis_points(500);
        assert!(Item::new("A", Money::ZERO, rate).is_err());
        assert!(Item::new("A", Money::from_cents(-100), rate).is_err());
        assert!(Item::new("  ", Money::from_cents(100), rate).is_err());
    }

    #[test]
    fn test_item_profit() {
        let item = Item::parse("B", "300", "6").unwrap();
        assert_eq!(item.profit().to_money(), Money::from_cents(1800));
    }

    #[test]
    fn test_solution_from_indices() {
        let catalog: Catalog = vec![
            Item::parse("A", "100", "20").unwrap(),
            Item::parse("B", "300", "6").unwrap(),
            Item::parse("C", "150", "10").unwrap(),
        ]
        .into();

        let solution = Solution::from_indices(&catalog, vec![0, 2]).unwrap();
        assert_eq!(solution.total_cost, Money::from_cents(25_000));
        assert_eq!(solution.total_profit.to_money(), Money::from_cents(3500));
        assert_eq!(solution.chosen[1].name(), "C");
    }
}
