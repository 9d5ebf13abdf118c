use crate::cli::commands::resolve_caller;
use crate::cli::parser::{Cli, Commands, SalaryAction};
use crate::config::Config;
use crate::core::payroll::PayrollLogic;
use crate::db::identity;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::salary::SalaryInfo;
use crate::ui::messages;
use crate::utils::format_currency;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let action = match &cli.command {
        Commands::Salary { action } => action,
        _ => return Ok(()),
    };

    let pool = DbPool::open_ready(&cfg.database)?;
    let (user, caller) = resolve_caller(&pool.conn, cli.acting.as_deref())?;

    match action {
        SalaryAction::Set {
            employee,
            basic,
            hra,
            standard_allowance,
            performance_bonus,
            lta,
            fixed_allowance,
            pf_employee,
            pf_employer,
            professional_tax,
        } => {
            let target = identity::require_user_by_login(&pool.conn, employee)?;

            let mut salary = SalaryInfo::default_for(target.id);
            salary.basic_salary = *basic;
            salary.hra = *hra;
            salary.standard_allowance = *standard_allowance;
            salary.performance_bonus = *performance_bonus;
            salary.lta = *lta;
            salary.fixed_allowance = *fixed_allowance;
            salary.pf_employee = *pf_employee;
            salary.pf_employer = *pf_employer;
            salary.professional_tax = *professional_tax;

            PayrollLogic::set_salary(&pool.conn, &caller, &salary)?;
            messages::success(format!("Salary updated for {}", target.login_id));
        }

        SalaryAction::Show { employee } => {
            let target = match employee {
                Some(login) => identity::require_user_by_login(&pool.conn, login)?,
                None => user,
            };

            let salary = PayrollLogic::salary_of(&pool.conn, &caller, target.id)?;
            let sym = cfg.currency_symbol.as_str();

            messages::header(format!("Salary for {}", target.full_name()));
            println!("Basic salary       : {}", format_currency(salary.basic_salary, sym));
            println!("HRA                : {}", format_currency(salary.hra, sym));
            println!("Standard allowance : {}", format_currency(salary.standard_allowance, sym));
            println!("Performance bonus  : {}", format_currency(salary.performance_bonus, sym));
            println!("LTA                : {}", format_currency(salary.lta, sym));
            println!("Fixed allowance    : {}", format_currency(salary.fixed_allowance, sym));
            println!("Gross              : {}", format_currency(salary.gross(), sym));
            println!("PF (employee)      : {}", format_currency(salary.pf_employee, sym));
            println!("Professional tax   : {}", format_currency(salary.professional_tax, sym));
            println!("Deductions         : {}", format_currency(salary.deductions(), sym));
            println!("Net                : {}", format_currency(salary.net(), sym));
        }
    }
    Ok(())
}
