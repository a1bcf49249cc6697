use tokio_postgres::types::ToSql;

// Type aliases for PostgreSQL parameter types
pub type PgParam = dyn ToSql + Sync;
pub type PgSendParam = dyn ToSql + Sync + Send;
pub type PgParamBox = Box<PgSendParam>;
pub type PgParamVec = Vec<PgParamBox>;

pub fn param_refs(params: &[PgParamBox]) -> Vec<&PgParam> {
    params.iter().map(|p| p.as_ref() as &PgParam).collect()
}

/// Escapes `%`, `_` and `\` so `term` matches literally inside `LIKE`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Accumulates conjunctive `WHERE` clauses with numbered placeholders.
#[derive(Default)]
pub struct WhereBuilder {
    clauses: Vec<String>,
    params: PgParamVec,
}

impl WhereBuilder {
    pub fn new() -> Self { Self::default() }

    fn next_placeholder(&mut self, param: PgParamBox) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    /// `column <op> $n`
    pub fn compare<T>(mut self, column: &str, op: &str, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        let placeholder = self.next_placeholder(Box::new(value));
        self.clauses.push(format!("{column} {op} {placeholder}"));
        self
    }

    /// `column = ANY($n)`
    pub fn any_of<T>(mut self, column: &str, values: Vec<T>) -> Self
    where
        Vec<T>: ToSql + Sync + Send + 'static,
    {
        let placeholder = self.next_placeholder(Box::new(values));
        self.clauses.push(format!("{column} = ANY({placeholder})"));
        self
    }

    /// `column LIKE '%term%'` with the term matched literally.
    pub fn contains(mut self, column: &str, term: &str) -> Self {
        let pattern = format!("%{}%", escape_like(term));
        let placeholder = self.next_placeholder(Box::new(pattern));
        self.clauses.push(format!("{column} LIKE {placeholder}"));
        self
    }

    /// Raw clause without parameters, e.g. `num_product > 0`.
    pub fn raw(mut self, clause: &str) -> Self {
        self.clauses.push(clause.to_string());
        self
    }

    pub fn build(self) -> (String, PgParamVec) {
        if self.clauses.is_empty() {
            return (String::new(), self.params);
        }
        let where_clause = format!(" WHERE {}", self.clauses.join(" AND "));
        (where_clause, self.params)
    }
}
