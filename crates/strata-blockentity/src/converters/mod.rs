mod comparator;
mod decorated_pot;
mod end_gateway;

pub(crate) use comparator::comparator;
pub(crate) use decorated_pot::decorated_pot;
pub(crate) use end_gateway::end_gateway;
