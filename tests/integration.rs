use std::str::from_utf8;

use bank_sim::bank::Bank;
use bank_sim::bin_utils::Shell;
use rust_decimal_macros::dec;

fn run_session(script: &str) -> (String, Vec<(String, rust_decimal::Decimal)>) {
    let mut output = Vec::new();
    let mut shell = Shell::new(script.as_bytes(), &mut output);
    shell.run().unwrap();
    let balances = shell
        .bank()
        .registry()
        .accounts()
        .iter()
        .map(|acc| (acc.number().to_string(), acc.balance()))
        .collect();
    drop(shell);
    (from_utf8(&output).unwrap().to_owned(), balances)
}

#[test]
fn savings_and_checking_session() {
    let script = "\
1
Alice
S1
500
1
5
1
Bob
C1
100
2
50
2
1
2
450
2
1
2
300
2
2
2
130
2
2
2
25
5
3
2
4
1
7
";
    let (output, balances) = run_session(script);

    assert!(output.starts_with("Welcome to Bank Account Simulation!"));
    assert_eq!(output.matches("Account created successfully!").count(), 2);
    assert!(output.contains("1. S1 (Alice)"));
    assert!(output.contains("2. C1 (Bob)"));
    assert!(output.contains("Cannot withdraw! Minimum balance of $100.00 must be maintained."));
    assert!(output.contains("Withdrawn $300.00. New balance: $200.00"));
    assert!(output.contains("Withdrawn $130.00. New balance: $-30.00"));
    assert!(output.contains("Warning: Account overdrawn by $30.00"));
    assert!(output.contains("Withdrawal denied! Maximum available: $20.00 (including overdraft)"));
    assert!(output.contains("Adding interest to account: S1"));
    assert!(output.contains("Interest added: $10.00. New balance: $210.00"));
    assert!(output.contains("Account Type: Checking"));
    assert!(output.contains("Current Balance: $-30.00"));
    assert!(output.contains("Overdraft Limit: $50.00"));
    assert!(output.contains("] INITIAL_DEPOSIT: $500.00 | Balance: $500.00"));
    assert!(output.contains("] WITHDRAWAL: $300.00 | Balance: $200.00"));
    assert!(output.contains("] INTEREST: $10.00 | Balance: $210.00"));
    assert!(output.ends_with("Thank you for using Bank Account Simulation!\n"));

    assert_eq!(
        balances,
        [("S1".to_string(), dec!(210)), ("C1".to_string(), dec!(-30))]
    );
}

#[test]
fn rejects_invalid_input() {
    let script = "\
2
9
abc
1
Alice
A1
-5
1
Alice
A1
0
3
1
Alice
A1
0
2
0
1
Bob
A1
2
1
1
0
2
1
1
xyz
5
4
1
";
    let (output, balances) = run_session(script);

    assert!(output.contains("No accounts available! Please create an account first."));
    // a menu choice that is not a number is just another invalid choice
    assert_eq!(output.matches("Invalid choice! Please try again.").count(), 2);
    assert!(!output.contains("`abc`"));
    // a bad amount aborts the action
    assert!(output.contains("Invalid input `xyz`! Please enter a number."));
    assert!(output.contains("Initial balance cannot be negative!"));
    assert!(output.contains("Invalid account type `3`!"));
    assert!(output.contains("Account number already exists!"));
    assert!(output.contains("Deposit amount must be positive!"));
    assert!(output.contains("No savings accounts found!"));
    // history of an account opened with zero balance and no accepted deposit
    assert!(output.contains("No transactions found."));
    // the input ended without an explicit exit
    assert!(output.ends_with("Thank you for using Bank Account Simulation!\n"));

    assert_eq!(balances, [("A1".to_string(), dec!(0))]);
}

#[test]
fn interest_is_shown_rounded() {
    let script = "\
1
Erin
S5
123.45
1
2.5
5
3
1
7
";
    let (output, balances) = run_session(script);
    assert!(output.contains("Interest added: $3.09. New balance: $126.54"));
    assert!(output.contains("Current Balance: $126.54"));
    assert!(output.contains("Interest Rate: 2.50%"));
    assert_eq!(balances, [("S5".to_string(), dec!(126.53625))]);
}

#[test]
fn reject_deposit_past_largest_balance() {
    let script = "\
1
Dan
D1
0
2
0
2
1
1
79228162514264337593543950335
2
1
1
79228162514264337593543950335
7
";
    let (output, balances) = run_session(script);
    assert!(output.contains("Deposit amount is too large!"));
    assert!(output.ends_with("Thank you for using Bank Account Simulation!\n"));
    assert_eq!(balances, [("D1".to_string(), rust_decimal::Decimal::MAX)]);
}

#[test]
fn export_history_as_csv() {
    let script = "\
1
Carol
C9
100
checking
0
2
1
1
25.5
6
1
7
";
    let (output, _) = run_session(script);
    let csv: Vec<&str> = output
        .lines()
        .skip_while(|line| *line != "timestamp,kind,amount,balance")
        .take(3)
        .collect();
    assert_eq!(csv.len(), 3);
    assert!(csv[1].ends_with(",INITIAL_DEPOSIT,100.00,100.00"));
    assert!(csv[2].ends_with(",DEPOSIT,25.50,125.50"));
}

#[test]
fn exit_immediately() {
    let mut output = Vec::new();
    let mut shell = Shell::new("7\n".as_bytes(), &mut output);
    shell.run().unwrap();
    assert!(shell.bank().list_accounts().is_empty());
}
