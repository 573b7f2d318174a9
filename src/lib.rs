pub mod core;
pub mod store;
pub mod query;
pub mod search;
pub mod reviews;
pub mod users;
pub mod graphql;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                          DUNGEONDEX REQUEST FLOW                             │
└──────────────────────────────────────────────────────────────────────────────┘

  POST /graphql ──► graphql::server ──► graphql::schema (QueryRoot / MutationRoot)
                                               │
          ┌────────────────────────────────────┼──────────────────────────────┐
          ▼                                    ▼                              ▼
  monsters(...)                    monster / facets / user         add / update /
          │                                    │                       deleteReview
          │                                    │                       dungeon edits
          ▼                                    │                              │
  query::planner::QueryNormalizer              │                              ▼
   MonsterQuery ──► QueryPlan                  │                    reviews::ReviewService
   { base_filter, search_term,                 │                    users::UserService
     sort, page, suggestions_only }            │                     read ─► modify ─►
          │                                    │                     replace(revision)
          │                                    │                              │
          ▼                                    │                              │
  search::executor::MonsterSearch              │                              │
   ├─ suggestions      (prefix, {id,name})     │                              │
   ├─ AggregationSorter (difficulty/reviews)   │                              │
   ├─ two-phase match   (prefix ++ substring)  │                              │
   ├─ plain fetch       (name order)           │                              │
   ├─ count             (same predicate)       │                              │
   └─ RangeResolver     (min/max hit points)   │                              │
          │                                    │                              │
          ▼                                    ▼                              ▼
  ┌──────────────────────────────────────────────────────────────────────────────┐
  │ core::database::Database                                                     │
  │   monsters: store::Collection<Monster>   (RwLock<Vec<_>>, insertion order)   │
  │   users:    store::Collection<User>     (dungeon name, favorited monsters)   │
  │   seeded once at startup by store::seed::SeedFile                            │
  └──────────────────────────────────────────────────────────────────────────────┘
*/
