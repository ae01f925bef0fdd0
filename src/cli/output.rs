use crate::models::EmployeeRecord;
use crate::render::{Body, VisualTree};

pub(crate) fn print_employees(employees: &[EmployeeRecord]) {
    if employees.is_empty() {
        println!("No employees found");
        return;
    }
    println!(
        "{:<26} {:<12} {:<24} {:<28} {}",
        "ID", "EMPLOYEE ID", "NAME", "EMAIL", "DEPARTMENT"
    );
    for e in employees {
        println!(
            "{:<26} {:<12} {:<24} {:<28} {}",
            e.id, e.employee_id, e.name, e.email, e.department
        );
    }
}

/// Plain-text rendition of a page tree.
pub(crate) fn print_tree(tree: &VisualTree) {
    println!("{}    {}", tree.header.company, tree.header.date);
    println!();
    println!("{}", tree.title);
    println!();
    for line in &tree.recipient {
        println!("{}", line);
    }
    if !tree.recipient.is_empty() {
        println!();
    }

    match &tree.body {
        Body::Text(paragraphs) => {
            for paragraph in paragraphs {
                println!("{}", paragraph);
                println!();
            }
        }
        Body::Salary(table) => {
            for (label, value) in &table.details {
                println!("{:<16} {}", label, value);
            }
            println!();
            println!("Earnings");
            for row in &table.earnings {
                println!("  {:<20} {:>16}", row.label, row.amount);
            }
            println!("  {:<20} {:>16}", "Total Earnings", table.total_earnings);
            println!("Deductions");
            for row in &table.deductions {
                println!("  {:<20} {:>16}", row.label, row.amount);
            }
            println!("  {:<20} {:>16}", "Total Deductions", table.total_deductions);
            println!();
            println!("Net Salary: {}", table.net_salary);
            println!();
        }
    }

    if let Some(signature) = &tree.footer.signature {
        println!("{}", signature.closing);
        println!("{}", signature.name);
        println!("{}", signature.title);
    }
    if let Some(note) = &tree.footer.note {
        println!("{}", note);
    }
}
