use portfolio_knapsack::{
    solve_dynamic, solve_exhaustive, Catalog, DynamicSolver, ExhaustiveSolver, Item, Money,
    Profit, ProfitRate, Solution, Solver,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_catalog(rng: &mut SmallRng, max_items: usize) -> Catalog {
    let n = rng.gen_range(0..=max_items);
    (0..n)
        .map(|i| {
            let cost = Money::from_cents(rng.gen_range(1..=5_000));
            let rate = ProfitRate::from_basis_points(rng.gen_range(0..=3_000));
            Item::new(format!("Share-{}", i), cost, rate).unwrap()
        })
        .collect()
}

fn assert_consistent(catalog: &Catalog, budget: Money, solution: &Solution) {
    assert!(solution.total_cost <= budget);
    assert!(solution.indices.windows(2).all(|w| w[0] < w[1]));

    let cost: i64 = solution.indices.iter().map(|&i| catalog.items()[i].cost().cents()).sum();
    let profit: u64 = solution
        .indices
        .iter()
        .map(|&i| {
            let item = &catalog.items()[i];
            item.cost().cents() as u64 * item.profit_rate().basis_points() as u64
        })
        .sum();
    assert_eq!(solution.total_cost, Money::from_cents(cost));
    assert_eq!(solution.total_profit, Profit::from_micros(profit));
}

#[test]
fn test_solvers_agree_on_optimal_profit() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..200 {
        let catalog = random_catalog(&mut rng, 12);
        let budget = Money::from_cents(rng.gen_range(0..=20_000));

        let exhaustive = solve_exhaustive(&catalog, budget).unwrap();
        let dynamic = solve_dynamic(&catalog, budget).unwrap();

        assert_eq!(exhaustive.total_profit, dynamic.total_profit);
        assert_consistent(&catalog, budget, &exhaustive);
        assert_consistent(&catalog, budget, &dynamic);
    }
}

#[test]
fn test_profit_is_monotonic_in_budget() {
    let mut rng = SmallRng::seed_from_u64(7);
    let catalog = random_catalog(&mut rng, 10);

    let solvers: [fn(&Catalog, Money) -> portfolio_knapsack::Result<Solution>; 2] =
        [solve_exhaustive, solve_dynamic];
    for solve in solvers {
        let mut previous = Profit::ZERO;
        for cents in (0..=30_000).step_by(750) {
            let profit = solve(&catalog, Money::from_cents(cents)).unwrap().total_profit;
            assert!(profit >= previous);
            previous = profit;
        }
    }
}

#[test]
fn test_repeated_solves_are_identical() {
    let mut rng = SmallRng::seed_from_u64(99);
    let catalog = random_catalog(&mut rng, 14);
    let budget = Money::from_cents(12_000);

    let solvers: Vec<Box<dyn Solver>> = vec![
        Box::new(ExhaustiveSolver::new(1)),
        Box::new(ExhaustiveSolver::new(4)),
        Box::new(DynamicSolver::default()),
    ];
    for solver in solvers {
        let first = serde_json::to_string(&solver.solve(&catalog, budget).unwrap()).unwrap();
        let second = serde_json::to_string(&solver.solve(&catalog, budget).unwrap()).unwrap();
        assert_eq!(first, second, "{} is not deterministic", solver.name());
    }
}

#[test]
fn test_empty_catalog() {
    let catalog = Catalog::new();
    for budget in [Money::ZERO, Money::from_cents(50_000)] {
        assert_eq!(solve_exhaustive(&catalog, budget).unwrap(), Solution::empty());
        assert_eq!(solve_dynamic(&catalog, budget).unwrap(), Solution::empty());
    }
}

#[test]
fn test_zero_budget() {
    let catalog: Catalog = vec![
        Item::parse("A", "0.01", "50").unwrap(),
        Item::parse("B", "10", "5").unwrap(),
    ]
    .into();
    assert!(solve_exhaustive(&catalog, Money::ZERO).unwrap().is_empty());
    assert!(solve_dynamic(&catalog, Money::ZERO).unwrap().is_empty());
}

#[test]
fn test_three_item_scenario_matches_brute_force() {
    let catalog: Catalog = vec![
        Item::parse("A", "100", "20").unwrap(),
        Item::parse("B", "300", "6").unwrap(),
        Item::parse("C", "150", "10").unwrap(),
    ]
    .into();
    let budget = Money::parse("450").unwrap();

    // {A, C}: 250 for 35, {A, B}: 400 for 38, {B, C}: 450 for 33, all three: 550
    let reference = solve_exhaustive(&catalog, budget).unwrap();
    let dynamic = solve_dynamic(&catalog, budget).unwrap();

    assert_eq!(reference.total_profit.to_money(), Money::parse("38").unwrap());
    assert_eq!(dynamic.total_profit, reference.total_profit);
    assert_eq!(dynamic.indices, reference.indices);
    assert_eq!(dynamic.total_cost, Money::parse("400").unwrap());
}

#[test]
fn test_single_item_over_budget() {
    let catalog: Catalog = vec![Item::parse("Big", "600", "30").unwrap()].into();
    let budget = Money::parse("500").unwrap();
    for solution in [
        solve_exhaustive(&catalog, budget).unwrap(),
        solve_dynamic(&catalog, budget).unwrap(),
    ] {
        assert!(solution.is_empty());
        assert_eq!(solution.total_profit, Profit::ZERO);
    }
}

#[test]
fn test_everything_fits() {
    let catalog: Catalog = vec![
        Item::parse("A", "20", "5").unwrap(),
        Item::parse("B", "30", "10").unwrap(),
        Item::parse("C", "50", "15").unwrap(),
    ]
    .into();
    let budget = Money::parse("500").unwrap();
    let total = catalog.total_cost().unwrap();

    for solution in [
        solve_exhaustive(&catalog, budget).unwrap(),
        solve_dynamic(&catalog, budget).unwrap(),
    ] {
        assert_eq!(solution.indices, vec![0, 1, 2]);
        assert_eq!(solution.total_cost, total);
    }
}
