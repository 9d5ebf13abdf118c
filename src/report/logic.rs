//! Report dispatch: resolve the range, select rows once, render in the
//! requested format.

use crate::core::policy::{self, Action};
use crate::errors::AppResult;
use crate::models::user::Caller;
use crate::report::range::ReportRange;
use crate::report::{ReportFormat, ReportOutput, csv, html, rows};
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct ReportRequest<'a> {
    pub report_type: &'a str,
    pub subtype: &'a str,
    /// `START:END` spec, only meaningful with the `custom` subtype.
    pub range_spec: Option<&'a str>,
    pub format: ReportFormat,
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn generate(
        conn: &Connection,
        caller: &Caller,
        req: &ReportRequest,
        today: NaiveDate,
        currency_symbol: &str,
    ) -> AppResult<ReportOutput> {
        policy::authorize(caller, Action::RunReports, None)?;

        match (req.report_type, req.subtype) {
            ("attendance", subtype) => {
                let range = match subtype {
                    "daily" => ReportRange::Daily,
                    "weekly" => ReportRange::Weekly,
                    "monthly" => ReportRange::Monthly,
                    "custom" => match req.range_spec {
                        Some(spec) => ReportRange::parse_custom(spec)?,
                        None => return Ok(unsupported(req)),
                    },
                    _ => return Ok(unsupported(req)),
                };

                let (start, end) = range.resolve(today);
                let data = rows::attendance_rows(conn, caller.company_id, start, end)?;

                match req.format {
                    ReportFormat::View => {
                        Ok(ReportOutput::Html(html::attendance_table(range, today, &data)))
                    }
                    ReportFormat::Csv => {
                        let (filename, body) = csv::attendance_csv(range, today, &data)?;
                        Ok(ReportOutput::Csv { filename, body })
                    }
                }
            }

            ("payroll", "salary_slips") => {
                let data = rows::salary_slip_rows(conn, caller.company_id)?;
                match req.format {
                    ReportFormat::View => Ok(ReportOutput::Html(html::salary_slips_table(
                        &data,
                        currency_symbol,
                    ))),
                    ReportFormat::Csv => {
                        let (filename, body) = csv::salary_slips_csv(today, &data)?;
                        Ok(ReportOutput::Csv { filename, body })
                    }
                }
            }

            ("payroll", "summary") => {
                let data = rows::salary_slip_rows(conn, caller.company_id)?;
                let totals = rows::payroll_totals(&data);
                match req.format {
                    ReportFormat::View => Ok(ReportOutput::Html(html::payroll_summary_cards(
                        &totals,
                        currency_symbol,
                    ))),
                    ReportFormat::Csv => {
                        let (filename, body) = csv::payroll_summary_csv(today, &totals)?;
                        Ok(ReportOutput::Csv { filename, body })
                    }
                }
            }

            ("leave", "balance") => {
                let data = rows::leave_balance_rows(conn, caller.company_id, today)?;
                match req.format {
                    ReportFormat::View => Ok(ReportOutput::Html(html::leave_balance_table(&data))),
                    ReportFormat::Csv => {
                        let (filename, body) = csv::leave_balance_csv(today, &data)?;
                        Ok(ReportOutput::Csv { filename, body })
                    }
                }
            }

            ("employee", "directory") => {
                let data = rows::directory_rows(conn, caller.company_id)?;
                match req.format {
                    ReportFormat::View => Ok(ReportOutput::Html(html::directory_table(&data))),
                    ReportFormat::Csv => {
                        let (filename, body) = csv::directory_csv(today, &data)?;
                        Ok(ReportOutput::Csv { filename, body })
                    }
                }
            }

            _ => Ok(unsupported(req)),
        }
    }
}

fn unsupported(req: &ReportRequest) -> ReportOutput {
    ReportOutput::Unsupported {
        report_type: req.report_type.to_string(),
        subtype: req.subtype.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::errors::AppError;
    use crate::models::user::Role;
    use crate::utils::date::parse_date;

    fn mem_db() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        init_db(&conn).expect("init schema");

        conn.execute(
            "INSERT INTO companies (name, code, created_at) VALUES ('Acme', 'AC', datetime('now'))",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO users (login_id, email, password_hash, first_name, last_name,
                                role, department, company_id, created_at)
             VALUES ('ACADAA20240001', 'a@acme.com', 'h', 'Ada', 'Admin',
                     'admin', 'Management', 1, datetime('now')),
                    ('ACJODO20240001', 'j@acme.com', 'h', 'John', 'Doe',
                     'employee', 'Engineering', 1, datetime('now'))",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO attendance (employee_id, date, check_in, check_out, status,
                                     hours_worked, created_at)
             VALUES (2, '2024-06-10', '2024-06-10 09:00:00', '2024-06-10 17:30:00',
                     'present', 8.5, datetime('now')),
                    (2, '2024-06-11', '2024-06-11 09:15:00', NULL, 'present',
                     0.0, datetime('now'))",
            [],
        )
        .unwrap();
        conn
    }

    fn admin() -> Caller {
        Caller {
            user_id: 1,
            role: Role::Admin,
            company_id: 1,
        }
    }

    fn req<'a>(
        report_type: &'a str,
        subtype: &'a str,
        range_spec: Option<&'a str>,
        format: ReportFormat,
    ) -> ReportRequest<'a> {
        ReportRequest {
            report_type,
            subtype,
            range_spec,
            format,
        }
    }

    #[test]
    fn daily_csv_row_count_matches_the_ledger() {
        let conn = mem_db();
        let today = parse_date("2024-06-10").unwrap();

        let out = ReportLogic::generate(
            &conn,
            &admin(),
            &req("attendance", "daily", None, ReportFormat::Csv),
            today,
            "₹",
        )
        .unwrap();

        match out {
            ReportOutput::Csv { filename, body } => {
                assert_eq!(filename, "daily_attendance_20240610.csv");
                // header + one row for 2024-06-10
                assert_eq!(body.lines().count(), 2);
            }
            other => panic!("expected csv, got {:?}", other),
        }
    }

    #[test]
    fn weekly_view_includes_both_days() {
        let conn = mem_db();
        let today = parse_date("2024-06-12").unwrap();

        let out = ReportLogic::generate(
            &conn,
            &admin(),
            &req("attendance", "weekly", None, ReportFormat::View),
            today,
            "₹",
        )
        .unwrap();

        match out {
            ReportOutput::Html(html) => {
                assert_eq!(html.matches("<td>John Doe</td>").count(), 2);
            }
            other => panic!("expected html, got {:?}", other),
        }
    }

    #[test]
    fn unknown_subtype_is_unsupported_not_an_error() {
        let conn = mem_db();
        let out = ReportLogic::generate(
            &conn,
            &admin(),
            &req("attendance", "hourly", None, ReportFormat::View),
            parse_date("2024-06-10").unwrap(),
            "₹",
        )
        .unwrap();
        assert!(matches!(out, ReportOutput::Unsupported { .. }));
    }

    #[test]
    fn malformed_custom_range_is_an_error() {
        let conn = mem_db();
        let err = ReportLogic::generate(
            &conn,
            &admin(),
            &req(
                "attendance",
                "custom",
                Some("10/06/2024:2024-06-12"),
                ReportFormat::Csv,
            ),
            parse_date("2024-06-10").unwrap(),
            "₹",
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
    }

    #[test]
    fn reports_are_staff_only() {
        let conn = mem_db();
        let emp = Caller {
            user_id: 2,
            role: Role::Employee,
            company_id: 1,
        };
        let err = ReportLogic::generate(
            &conn,
            &emp,
            &req("employee", "directory", None, ReportFormat::View),
            parse_date("2024-06-10").unwrap(),
            "₹",
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn leave_balance_counts_requests_this_year() {
        let conn = mem_db();
        conn.execute(
            "INSERT INTO leave_requests (employee_id, leave_type, start_date, end_date,
                                         duration, reason, status, created_at)
             VALUES (2, 'paid', '2024-03-10', '2024-03-12', 'full_day', '', 'approved',
                     datetime('now')),
                    (2, 'sick', '2023-11-01', '2023-11-02', 'full_day', '', 'approved',
                     datetime('now')),
                    (2, 'paid', '2024-05-01', '2024-05-01', 'full_day', '', 'pending',
                     datetime('now'))",
            [],
        )
        .unwrap();

        let out = ReportLogic::generate(
            &conn,
            &admin(),
            &req("leave", "balance", None, ReportFormat::Csv),
            parse_date("2024-06-10").unwrap(),
            "₹",
        )
        .unwrap();

        match out {
            ReportOutput::Csv { body, .. } => {
                // only the approved 2024 request counts: used=1, remaining=21
                assert!(body.contains("ACJODO20240001,John Doe,Engineering,15,7,1,21"));
            }
            other => panic!("expected csv, got {:?}", other),
        }
    }
}
