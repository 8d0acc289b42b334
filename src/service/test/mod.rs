mod raffle;
