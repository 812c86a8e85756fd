mod test_inactive_rooms_swept;
mod test_sweep_races;
mod test_sweeper_task;
