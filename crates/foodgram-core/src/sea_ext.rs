use sea_orm::{
    ColumnTrait,
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
};

const LIKE_ESCAPE: char = '\\';

/// Escape `LIKE` wildcards so user input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

pub trait StartsWithIgnoreCase {
    /// `LOWER(column) LIKE 'prefix%'`, portable across Postgres and SQLite.
    fn starts_with_ignore_case(&self, prefix: &str) -> SimpleExpr;
}

impl<C> StartsWithIgnoreCase for C
where
    C: ColumnTrait,
{
    fn starts_with_ignore_case(&self, prefix: &str) -> SimpleExpr {
        let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
        Expr::expr(Func::lower(Expr::col(self.as_column_ref())))
            .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
    }
}
