pub mod calendar;
pub mod tournament_list;
