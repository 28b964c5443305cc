pub mod random_expenses;
