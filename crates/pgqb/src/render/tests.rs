use super::*;
use crate::prelude::*;
use crate::statement::Select;

fn sql_of(query: &impl SqlQuery) -> String {
    query.to_sql().unwrap()
}

#[test]
fn test_grouped_scenario() {
    let mut query = select("users");
    query
        .where_clause()
        .eq("status", "active")
        .sub_where("OR")
        .unwrap()
        .greater_than_or_equal("age", 18)
        .is_not_null("flag")
        .end();

    let built = query.build().unwrap();
    assert_eq!(
        built.sql(),
        "SELECT * FROM users WHERE (users.status = $1) AND ((users.age >= $2) OR (users.flag IS NOT NULL))"
    );
    assert_eq!(built.params(), &[Value::from("active"), Value::Int(18)]);
    assert_eq!(built.params_ref().len(), 2);
}

#[test]
fn test_no_conditions_renders_no_where() {
    let mut query = select("users");
    assert_eq!(sql_of(&query), "SELECT * FROM users");

    query.where_clause().end();
    assert_eq!(sql_of(&query), "SELECT * FROM users");
}

#[test]
fn test_comparison_operators() {
    let mut query = select("t");
    query
        .where_clause()
        .not_equals("a", 1)
        .greater_than("b", 2)
        .less_than("c", 3)
        .less_than_or_equal("d", 4)
        .like("e", "x%")
        .not_like("f", "%y")
        .end();

    assert_eq!(
        sql_of(&query),
        "SELECT * FROM t WHERE (t.a <> $1) AND (t.b > $2) AND (t.c < $3) \
         AND (t.d <= $4) AND (t.e LIKE $5) AND (t.f NOT LIKE $6)"
    );
}

#[test]
fn test_category_order_drives_param_numbers() {
    let mut query = select("t");
    query
        .where_clause()
        .eq("a", 1)
        .is_null("n")
        .in_list("id", [5])
        .between("age", 18, 65)
        .end();

    let built = query.build().unwrap();
    assert_eq!(
        built.sql(),
        "SELECT * FROM t WHERE (t.id IN ($1)) AND (t.age BETWEEN $2 AND $3) \
         AND (t.a = $4) AND (t.n IS NULL)"
    );
    assert_eq!(
        built.params(),
        &[Value::Int(5), Value::Int(18), Value::Int(65), Value::Int(1)]
    );
}

#[test]
fn test_empty_membership_lists() {
    let mut query = select("t");
    query.where_clause().in_list("id", Vec::<i32>::new()).end();
    assert_eq!(sql_of(&query), "SELECT * FROM t WHERE 1=0");

    let mut query = select("t");
    query.where_clause().not_in("id", Vec::<i32>::new()).end();
    assert_eq!(sql_of(&query), "SELECT * FROM t WHERE 1=1");
}

#[test]
fn test_not_in_and_not_between() {
    let mut query = select("t");
    query
        .where_clause()
        .not_in("role", ["guest", "banned"])
        .not_between("age", 1, 2)
        .end();

    assert_eq!(
        sql_of(&query),
        "SELECT * FROM t WHERE (t.role NOT IN ($1, $2)) AND (t.age NOT BETWEEN $3 AND $4)"
    );
}

#[test]
fn test_literal_keeps_insertion_position() {
    let mut query = select("t");
    query
        .where_clause()
        .eq("a", 1)
        .as_literal("b > 2")
        .eq("c", 3)
        .end();

    assert_eq!(
        sql_of(&query),
        "SELECT * FROM t WHERE (t.a = $1) AND (b > 2) AND (t.c = $2)"
    );
}

#[test]
fn test_literal_with_or_stays_grouped() {
    let mut query = select("t");
    query
        .where_clause()
        .as_literal("a = 1 OR b = 2")
        .eq("c", 3)
        .end();

    assert_eq!(
        sql_of(&query),
        "SELECT * FROM t WHERE (a = 1 OR b = 2) AND (t.c = $1)"
    );
}

#[test]
fn test_in_list_after_table_change_renders_latest_binding() {
    let mut query = select("users");
    query
        .where_clause()
        .in_list("x", [1, 2])
        .set_table("accounts")
        .in_list("x", [3])
        .end();

    let built = query.build().unwrap();
    assert_eq!(built.sql(), "SELECT * FROM users WHERE (accounts.x IN ($1))");
    assert_eq!(built.params(), &[Value::Int(3)]);
}

#[test]
fn test_dotted_name_uses_its_own_qualifier() {
    let mut query = select("users");
    query
        .where_clause()
        .eq("u.id", 1)
        .is_null("app.orders.shipped_at")
        .end();

    assert_eq!(
        sql_of(&query),
        "SELECT * FROM users WHERE (u.id = $1) AND (app.orders.shipped_at IS NULL)"
    );
}

#[test]
fn test_bit_clause_and_nulls() {
    let mut query = select("t");
    query
        .where_clause()
        .add_bit_clause("flags", 1)
        .is_not_null("x")
        .is_null("y")
        .end();

    assert_eq!(
        sql_of(&query),
        "SELECT * FROM t WHERE (t.y IS NULL) AND (t.x IS NOT NULL) AND (COALESCE(t.flags, 0) = $1)"
    );
}

#[test]
fn test_full_text_modes() {
    let mut query = select("posts");
    query
        .where_clause()
        .match_against(["title"], ["rust"])
        .match_boolean(["title", "body"], ["+a", "-b"])
        .match_with_query_expansion(["body"], ["db"])
        .end();

    assert_eq!(
        sql_of(&query),
        "SELECT * FROM posts WHERE (MATCH(posts.title) AGAINST($1)) \
         AND (MATCH(posts.title, posts.body) AGAINST($2, $3 IN BOOLEAN MODE)) \
         AND (MATCH(posts.body) AGAINST($4 WITH QUERY EXPANSION))"
    );
}

#[test]
fn test_full_text_arity_mismatch_fails() {
    let mut query = select("posts");
    query
        .where_clause()
        .match_against(["title", "body"], ["rust"])
        .end();

    assert_eq!(
        query.build().unwrap_err(),
        QueryError::MatchArity {
            columns: 2,
            values: 1
        }
    );

    let mut query = select("posts");
    query
        .where_clause()
        .match_against(Vec::<&str>::new(), Vec::<&str>::new())
        .end();
    assert!(matches!(query.build(), Err(QueryError::MatchArity { .. })));
}

#[test]
fn test_nested_exists_share_placeholder_sequence() {
    let mut orders = select("orders");
    orders.where_clause().greater_than("total", 100).end();

    let mut banned = select("bans");
    banned.where_clause().eq("reason", "fraud").end();

    let mut query = select("users");
    query
        .where_clause()
        .eq("status", "active")
        .exists(orders)
        .not_exists(banned)
        .end();

    let built = query.build().unwrap();
    assert_eq!(
        built.sql(),
        "SELECT * FROM users WHERE (users.status = $1) \
         AND EXISTS (SELECT * FROM orders WHERE (orders.total > $2)) \
         AND NOT EXISTS (SELECT * FROM bans WHERE (bans.reason = $3))"
    );
    assert_eq!(built.params().len(), 3);
}

#[test]
fn test_column_and_subquery_operands() {
    let mut max_total = select("orders");
    max_total.columns(["total"]);

    let mut query = select("users");
    query
        .where_clause()
        .eq("id", Column::of("orders", "user_id"))
        .less_than("limit", max_total)
        .end();

    assert_eq!(
        sql_of(&query),
        "SELECT * FROM users WHERE (users.id = orders.user_id) \
         AND (users.limit < (SELECT orders.total FROM orders))"
    );
}

#[test]
fn test_empty_sub_group_is_skipped() {
    let mut query = select("t");
    query
        .where_clause()
        .eq("a", 1)
        .sub_where_or()
        .parent()
        .sub_where("AND")
        .unwrap()
        .eq("b", 2)
        .end();

    assert_eq!(
        sql_of(&query),
        "SELECT * FROM t WHERE (t.a = $1) AND ((t.b = $2))"
    );
}

#[test]
fn test_negated_conjunctions() {
    let mut query = select("t");
    query
        .where_clause()
        .conjunction("AND NOT")
        .unwrap()
        .eq("a", 1)
        .eq("b", 2)
        .sub_where("or not")
        .unwrap()
        .eq("c", 3)
        .eq("d", 4)
        .end();

    assert_eq!(
        sql_of(&query),
        "SELECT * FROM t WHERE (t.a = $1) AND NOT (t.b = $2) AND NOT ((t.c = $3) OR NOT (t.d = $4))"
    );
}

#[test]
fn test_alias_and_schema_qualification() {
    let mut query = select(Table::new("users").with_alias("u"));
    query.where_clause().eq("id", 1).end();
    assert_eq!(sql_of(&query), "SELECT * FROM users AS u WHERE (u.id = $1)");

    let mut query = select(Table::new("users").with_schema("app"));
    query.where_clause().eq("id", 1).end();
    assert_eq!(
        sql_of(&query),
        "SELECT * FROM app.users WHERE (app.users.id = $1)"
    );
}

#[test]
fn test_question_mark_placeholders() {
    let mut query = select("t");
    query.where_clause().eq("a", 1).in_list("b", [2, 3]).end();

    let config = RenderConfig::new().with_placeholder(Placeholder::QuestionMark);
    let built = query.build_with(&config).unwrap();
    assert_eq!(
        built.sql(),
        "SELECT * FROM t WHERE (t.b IN (?, ?)) AND (t.a = ?)"
    );
    assert_eq!(built.params().len(), 3);
}

#[test]
fn test_always_quote_identifiers() {
    let mut query = select("users");
    query.columns(["*"]).where_clause().eq("status", "x").end();

    let config = RenderConfig::new().with_quoting(IdentQuoting::Always);
    assert_eq!(
        query.build_with(&config).unwrap().sql(),
        r#"SELECT "users".* FROM "users" WHERE ("users"."status" = $1)"#
    );
}

#[test]
fn test_unusual_names_are_quoted() {
    let mut query = select("order items");
    query.where_clause().eq("unit \"price\"", 1).end();

    assert_eq!(
        sql_of(&query),
        r#"SELECT * FROM "order items" WHERE ("order items"."unit ""price""" = $1)"#
    );
}

#[test]
fn test_writer_counts_params() {
    let mut out = SqlWriter::new(RenderConfig::default());
    out.push("x = ");
    out.push_param(&Value::Int(1));
    out.push(" AND y IN (");
    out.push_param_list(&[Value::Int(2), Value::Int(3)]);
    out.push(")");

    assert_eq!(out.param_count(), 3);
    assert_eq!(out.sql(), "x = $1 AND y IN ($2, $3)");

    let (sql, params) = out.finish().into_parts();
    assert_eq!(sql, "x = $1 AND y IN ($2, $3)");
    assert_eq!(params.len(), 3);
}

#[test]
fn test_subquery_without_table_fails() {
    let mut query = select("users");
    query.where_clause().exists(Select::default()).end();
    assert!(matches!(query.build(), Err(QueryError::Validation(_))));
}

#[test]
fn test_truncate_sql() {
    assert_eq!(truncate_sql("SELECT 1", Some(3)), "SEL...");
    assert_eq!(truncate_sql("SELECT 1", Some(100)), "SELECT 1");
    assert_eq!(truncate_sql("SELECT 1", None), "SELECT 1");
    assert_eq!(truncate_sql("éé", Some(3)), "é...");
}

#[test]
fn test_default_config() {
    let config = RenderConfig::default();
    assert_eq!(config.placeholder, Placeholder::Dollar);
    assert_eq!(config.quoting, IdentQuoting::AsNeeded);
    assert_eq!(config.max_logged_sql, Some(200));
    assert_eq!(config.no_truncate().max_logged_sql, None);
}
