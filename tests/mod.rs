mod analyzers;
mod end_to_end;
mod report;
